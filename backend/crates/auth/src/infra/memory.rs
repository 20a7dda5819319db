//! In-Memory Implementations
//!
//! Single-process stores for development without a database and for tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use kernel::id::{AdminId, UserId};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::entity::{admin::Admin, user::User};
use crate::domain::repository::{AdminRepository, KeyValueStore, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Key-Value Store
// ============================================================================

struct Entry {
    value: String,
    expires_at: Instant,
}

/// `HashMap` behind a tokio `RwLock`; expired entries are hidden on read
/// and dropped by `purge_expired`
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live entry count
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AuthResult<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone()))
    }

    async fn delete(&self, key: &str) -> AuthResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn purge_expired(&self) -> AuthResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok((before - entries.len()) as u64)
    }
}

// ============================================================================
// Account Repository
// ============================================================================

/// Users, admins and pending OTPs in process memory
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    admins: Arc<RwLock<HashMap<AdminId, Admin>>>,
    pending: InMemoryKeyValueStore,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending-OTP store backing this repository
    pub fn pending_store(&self) -> &InMemoryKeyValueStore {
        &self.pending
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn user_exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| &user.email == email))
    }

    async fn update_user(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.user_id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }

    async fn list_awaiting_approval(&self) -> AuthResult<Vec<User>> {
        let mut waiting: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.awaits_approval())
            .cloned()
            .collect();
        waiting.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.email.as_str().cmp(b.email.as_str()))
        });
        Ok(waiting)
    }
}

impl AdminRepository for InMemoryAuthRepository {
    async fn create_admin(&self, admin: &Admin) -> AuthResult<()> {
        let mut admins = self.admins.write().await;
        if admins.values().any(|existing| existing.email == admin.email) {
            return Ok(());
        }
        admins.insert(admin.admin_id, admin.clone());
        Ok(())
    }

    async fn find_admin_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<Admin>> {
        Ok(self.admins.read().await.get(admin_id).cloned())
    }

    async fn find_admin_by_email(&self, email: &Email) -> AuthResult<Option<Admin>> {
        Ok(self
            .admins
            .read()
            .await
            .values()
            .find(|admin| &admin.email == email)
            .cloned())
    }
}

impl KeyValueStore for InMemoryAuthRepository {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AuthResult<()> {
        self.pending.put(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        self.pending.get(key).await
    }

    async fn delete(&self, key: &str) -> AuthResult<bool> {
        self.pending.delete(key).await
    }

    async fn purge_expired(&self) -> AuthResult<u64> {
        self.pending.purge_expired().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = InMemoryKeyValueStore::new();
        store
            .put("registration:a@b.co", "v1".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        store
            .put("registration:a@b.co", "v2".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            store.get("registration:a@b.co").await.unwrap().as_deref(),
            Some("v2")
        );
        assert!(store.delete("registration:a@b.co").await.unwrap());
        assert!(!store.delete("registration:a@b.co").await.unwrap());
        assert_eq!(store.get("registration:a@b.co").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_and_purge() {
        let store = InMemoryKeyValueStore::new();
        store
            .put("short", "x".to_string(), Duration::from_secs(5))
            .await
            .unwrap();
        store
            .put("long", "y".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(6)).await;

        assert_eq!(store.get("short").await.unwrap(), None);
        assert_eq!(store.get("long").await.unwrap().as_deref(), Some("y"));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.purge_expired().await.unwrap(), 0);
    }
}
