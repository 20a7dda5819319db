//! Approval Queue Use Case
//!
//! Admin view of verified users waiting to be let in.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct ApprovalQueueUseCase<R>
where
    R: UserRepository + Sync,
{
    repo: Arc<R>,
}

impl<R> ApprovalQueueUseCase<R>
where
    R: UserRepository + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Verified, unapproved users, oldest registration first
    pub async fn list_unverified_users(&self) -> AuthResult<Vec<User>> {
        self.repo.list_awaiting_approval().await
    }

    /// Approve by id. Approving an approved user succeeds without a write.
    pub async fn approve_user(&self, user_id: &str) -> AuthResult<User> {
        let user_id: UserId = user_id.parse().map_err(|_| AuthError::UserNotFound)?;

        let mut user = self
            .repo
            .find_user_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.approve() {
            self.repo.update_user(&user).await?;
            tracing::info!(user_id = %user.user_id, email = %user.email, "User approved");
        } else {
            tracing::debug!(user_id = %user.user_id, "User already approved");
        }

        Ok(user)
    }
}
