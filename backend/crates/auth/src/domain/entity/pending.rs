//! Pending OTP Records
//!
//! A code waiting to be confirmed, together with whatever the flow needs to
//! finish once it is. Serialized as JSON into the `KeyValueStore`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, otp_code::OtpCode, tax_id::TaxId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOtp<T> {
    pub payload: T,
    pub code: OtpCode,
    pub expires_at: DateTime<Utc>,
}

impl<T> PendingOtp<T> {
    /// Fresh code valid for `ttl`
    pub fn issue(payload: T, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);

        Self {
            payload,
            code: OtpCode::generate(),
            expires_at: Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// A record is dead from the instant it reaches `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Everything needed to create the user once the email is confirmed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: DisplayName,
    pub email: Email,
    pub tax_id: TaxId,
    /// PHC string; cleartext never reaches the store
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetDraft {
    pub email: Email,
}
