//! Confirm Password Reset Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::pending::PendingOtps;
use crate::application::tokens;
use crate::domain::entity::pending::ResetDraft;
use crate::domain::repository::{KeyValueStore, UserRepository};
use crate::domain::value_object::{
    otp_purpose::OtpPurpose,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct ConfirmResetInput {
    pub continuation_token: String,
    pub otp: String,
    pub new_password: String,
}

pub struct ConfirmResetUseCase<R>
where
    R: UserRepository + KeyValueStore + Sync,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ConfirmResetUseCase<R>
where
    R: UserRepository + KeyValueStore + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ConfirmResetInput) -> AuthResult<()> {
        if input.otp.trim().is_empty() || input.new_password.is_empty() {
            return Err(AuthError::Validation("OTP and password required".to_string()));
        }

        let email = tokens::verify_continuation(
            &self.config,
            &input.continuation_token,
            OtpPurpose::PasswordReset,
        )?;

        let pending = PendingOtps::new(&*self.repo, &self.config, OtpPurpose::PasswordReset);
        let draft: ResetDraft = pending.redeem(&email, &input.otp).await?;

        // A rejected secret leaves the record in place for another attempt
        let raw_password = RawPassword::new(input.new_password, &self.config.password_policy)
            .map_err(AuthError::validation)?;

        let mut user = self
            .repo
            .find_user_by_email(&draft.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.change_password(UserPassword::from_raw(&raw_password, self.config.pepper())?);
        self.repo.update_user(&user).await?;
        pending.discard(&email).await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");

        Ok(())
    }
}
