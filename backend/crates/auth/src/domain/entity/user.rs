//! User Entity
//!
//! A registered account. Created from a confirmed registration only, so
//! rows written here are always verified. Sign-in still checks the flag for
//! rows that reach the table by other means.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, tax_id::TaxId, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: DisplayName,
    /// Unique, lower-cased
    pub email: Email,
    /// GSTIN
    pub tax_id: TaxId,
    pub password_hash: UserPassword,
    pub is_verified: bool,
    /// Set by an admin; gates sign-in
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create the account for a confirmed registration
    pub fn register(
        name: DisplayName,
        email: Email,
        tax_id: TaxId,
        password_hash: UserPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            tax_id,
            password_hash,
            is_verified: true,
            is_approved: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verified but not yet approved
    pub fn awaits_approval(&self) -> bool {
        self.is_verified && !self.is_approved
    }

    /// Mark approved; returns false when it already was
    pub fn approve(&mut self) -> bool {
        if self.is_approved {
            return false;
        }
        self.is_approved = true;
        self.updated_at = Utc::now();
        true
    }

    pub fn change_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
