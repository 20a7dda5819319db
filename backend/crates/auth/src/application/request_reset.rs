//! Request Password Reset Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::pending::PendingOtps;
use crate::application::tokens;
use crate::domain::entity::pending::ResetDraft;
use crate::domain::mailer::{Mailer, OutgoingMail};
use crate::domain::repository::{KeyValueStore, UserRepository};
use crate::domain::value_object::{email::Email, otp_purpose::OtpPurpose};
use crate::error::{AuthError, AuthResult};

pub struct RequestResetOutput {
    pub continuation_token: String,
}

pub struct RequestResetUseCase<R, M>
where
    R: UserRepository + KeyValueStore + Sync,
    M: Mailer + Sync,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> RequestResetUseCase<R, M>
where
    R: UserRepository + KeyValueStore + Sync,
    M: Mailer + Sync,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, email: &str) -> AuthResult<RequestResetOutput> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }

        let email = Email::new(email).map_err(AuthError::validation)?;

        if !self.repo.user_exists_by_email(&email).await? {
            return Err(AuthError::NoAccountForEmail);
        }

        let pending = PendingOtps::new(&*self.repo, &self.config, OtpPurpose::PasswordReset);
        let code = pending
            .stash(&email, ResetDraft { email: email.clone() })
            .await?;

        let mail = OutgoingMail::otp(
            email.clone(),
            OtpPurpose::PasswordReset.mail_subject(),
            code.as_str(),
        );
        self.mailer.send(&mail).await?;

        let continuation_token =
            tokens::issue_continuation(&self.config, &email, OtpPurpose::PasswordReset)?;

        tracing::info!(email = %email, purpose = %OtpPurpose::PasswordReset, "Password reset requested");

        Ok(RequestResetOutput { continuation_token })
    }
}
