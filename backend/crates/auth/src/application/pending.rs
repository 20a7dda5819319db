//! Pending OTP Ledger
//!
//! Typed access to pending OTP records in a `KeyValueStore`, keyed
//! `"<purpose>:<email>"`. Shared by the registration and reset flows.

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::config::AuthConfig;
use crate::domain::entity::pending::PendingOtp;
use crate::domain::repository::KeyValueStore;
use crate::domain::value_object::{email::Email, otp_code::OtpCode, otp_purpose::OtpPurpose};
use crate::error::{AuthError, AuthResult};

pub fn pending_key(purpose: OtpPurpose, email: &Email) -> String {
    format!("{}:{}", purpose.namespace(), email)
}

pub struct PendingOtps<'a, S>
where
    S: KeyValueStore + Sync,
{
    store: &'a S,
    config: &'a AuthConfig,
    purpose: OtpPurpose,
}

impl<'a, S> PendingOtps<'a, S>
where
    S: KeyValueStore + Sync,
{
    pub fn new(store: &'a S, config: &'a AuthConfig, purpose: OtpPurpose) -> Self {
        Self {
            store,
            config,
            purpose,
        }
    }

    /// Store a fresh code for `email`, replacing any earlier attempt
    pub async fn stash<T>(&self, email: &Email, payload: T) -> AuthResult<OtpCode>
    where
        T: Serialize + Send,
    {
        let pending = PendingOtp::issue(payload, self.config.otp_ttl);
        let value = serde_json::to_string(&pending)
            .map_err(|e| AuthError::Internal(format!("Pending OTP encoding failed: {e}")))?;

        self.store
            .put(
                &pending_key(self.purpose, email),
                value,
                self.config.pending_retention(),
            )
            .await?;

        Ok(pending.code)
    }

    /// Check `submitted` against the record for `email` and return its payload.
    ///
    /// The record is left in place on success; call `discard` once the flow
    /// has committed. An expired record is removed here.
    pub async fn redeem<T>(&self, email: &Email, submitted: &str) -> AuthResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let key = pending_key(self.purpose, email);

        let Some(raw) = self.store.get(&key).await? else {
            return Err(AuthError::OtpSessionExpired(self.purpose));
        };

        let pending: PendingOtp<T> = match serde_json::from_str(&raw) {
            Ok(pending) => pending,
            Err(e) => {
                self.store.delete(&key).await?;
                return Err(AuthError::Internal(format!(
                    "Corrupt pending OTP record: {e}"
                )));
            }
        };

        if pending.is_expired_at(Utc::now()) {
            self.store.delete(&key).await?;
            return Err(AuthError::OtpExpired);
        }

        if !pending.code.matches(submitted) {
            return Err(AuthError::InvalidOtp);
        }

        Ok(pending.payload)
    }

    pub async fn discard(&self, email: &Email) -> AuthResult<()> {
        self.store.delete(&pending_key(self.purpose, email)).await?;
        Ok(())
    }
}
