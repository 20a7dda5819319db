//! Confirm Registration Use Case
//!
//! Second registration step: check the emailed code and create the user as
//! verified but not yet approved.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::pending::PendingOtps;
use crate::application::tokens;
use crate::domain::entity::{pending::RegistrationDraft, user::User};
use crate::domain::repository::{KeyValueStore, UserRepository};
use crate::domain::value_object::{otp_purpose::OtpPurpose, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

pub struct ConfirmRegistrationUseCase<R>
where
    R: UserRepository + KeyValueStore + Sync,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ConfirmRegistrationUseCase<R>
where
    R: UserRepository + KeyValueStore + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, continuation_token: &str, otp: &str) -> AuthResult<User> {
        if continuation_token.trim().is_empty() || otp.trim().is_empty() {
            return Err(AuthError::Validation("OTP and token required".to_string()));
        }

        let email =
            tokens::verify_continuation(&self.config, continuation_token, OtpPurpose::Registration)?;

        let pending = PendingOtps::new(&*self.repo, &self.config, OtpPurpose::Registration);
        let draft: RegistrationDraft = pending.redeem(&email, otp).await?;

        // Someone may have completed a registration for this email meanwhile
        if self.repo.user_exists_by_email(&draft.email).await? {
            pending.discard(&email).await?;
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_phc_string(draft.password_hash)?;
        let user = User::register(draft.name, draft.email, draft.tax_id, password_hash);

        self.repo.create_user(&user).await?;
        pending.discard(&email).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered, awaiting approval"
        );

        Ok(user)
    }
}
