//! Admin Entity
//!
//! Operator account that reviews the approval queue. Admins are created by
//! boot-time provisioning only.

use chrono::{DateTime, Utc};
use kernel::id::AdminId;

use crate::domain::value_object::{email::Email, user_password::UserPassword};

#[derive(Debug, Clone)]
pub struct Admin {
    pub admin_id: AdminId,
    pub email: Email,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            admin_id: AdminId::new(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
