//! Check Session Use Case
//!
//! Resolves a session credential to the account it was issued to. Generic
//! over the account kind so the user and admin guards share one path.

use std::future::Future;
use std::sync::Arc;

use kernel::id::{AdminId, UserId};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::tokens;
use crate::domain::entity::{admin::Admin, user::User};
use crate::domain::repository::{AdminRepository, UserRepository};
use crate::domain::value_object::account_role::AccountRole;
use crate::error::{AuthError, AuthResult};

/// An account kind that can sit behind a session guard
pub trait GuardedAccount: Clone + Send + Sync + Sized + 'static {
    /// Role the session token must carry
    const ROLE: AccountRole;

    /// Error when the token is valid but the account is gone
    fn missing() -> AuthError;

    fn load<R>(repo: &R, account_id: Uuid) -> impl Future<Output = AuthResult<Option<Self>>> + Send
    where
        R: UserRepository + AdminRepository + Sync;
}

impl GuardedAccount for User {
    const ROLE: AccountRole = AccountRole::User;

    fn missing() -> AuthError {
        AuthError::UserNotFound
    }

    fn load<R>(repo: &R, account_id: Uuid) -> impl Future<Output = AuthResult<Option<Self>>> + Send
    where
        R: UserRepository + AdminRepository + Sync,
    {
        let user_id = UserId::from_uuid(account_id);
        async move { repo.find_user_by_id(&user_id).await }
    }
}

impl GuardedAccount for Admin {
    const ROLE: AccountRole = AccountRole::Admin;

    fn missing() -> AuthError {
        AuthError::AdminNotFound
    }

    fn load<R>(repo: &R, account_id: Uuid) -> impl Future<Output = AuthResult<Option<Self>>> + Send
    where
        R: UserRepository + AdminRepository + Sync,
    {
        let admin_id = AdminId::from_uuid(account_id);
        async move { repo.find_admin_by_id(&admin_id).await }
    }
}

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository + AdminRepository + Sync,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository + AdminRepository + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// `credential` is the raw token from the cookie or bearer header
    pub async fn execute<A>(&self, credential: Option<&str>) -> AuthResult<A>
    where
        A: GuardedAccount,
    {
        let token = credential.ok_or(AuthError::Unauthorized)?;
        let claims = tokens::verify_session(&self.config, token, A::ROLE)?;

        A::load(&*self.repo, claims.sub)
            .await?
            .ok_or_else(A::missing)
    }
}
