//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use std::time::Duration;

use kernel::id::{AdminId, UserId};

use crate::domain::entity::{admin::Admin, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; a duplicate email is `AuthError::EmailTaken`
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn user_exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist mutable fields (password hash, flags, `updated_at`)
    async fn update_user(&self, user: &User) -> AuthResult<()>;

    /// Verified and not approved, oldest first
    async fn list_awaiting_approval(&self) -> AuthResult<Vec<User>>;
}

/// Admin repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    async fn create_admin(&self, admin: &Admin) -> AuthResult<()>;

    async fn find_admin_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<Admin>>;

    async fn find_admin_by_email(&self, email: &Email) -> AuthResult<Option<Admin>>;
}

/// String key-value store with per-entry TTL
///
/// Holds pending OTP records. An entry past its TTL must never be returned.
#[trait_variant::make(KeyValueStore: Send)]
pub trait LocalKeyValueStore {
    /// Insert or overwrite
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AuthResult<()>;

    async fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Returns whether an entry was removed
    async fn delete(&self, key: &str) -> AuthResult<bool>;

    /// Drop entries past their TTL; returns how many were removed
    async fn purge_expired(&self) -> AuthResult<u64>;
}

/// Everything the HTTP layer needs from storage
pub trait AccountStore:
    UserRepository + AdminRepository + KeyValueStore + Clone + Send + Sync + 'static
{
}

impl<T> AccountStore for T where
    T: UserRepository + AdminRepository + KeyValueStore + Clone + Send + Sync + 'static
{
}
