//! Request Registration Use Case
//!
//! First registration step: validate the details, park them under a fresh
//! OTP, mail the code and hand back a continuation token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::pending::PendingOtps;
use crate::application::tokens;
use crate::domain::entity::pending::RegistrationDraft;
use crate::domain::mailer::{Mailer, OutgoingMail};
use crate::domain::repository::{KeyValueStore, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    otp_purpose::OtpPurpose,
    tax_id::TaxId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct RequestRegistrationInput {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub password: String,
}

pub struct RequestRegistrationOutput {
    pub continuation_token: String,
}

pub struct RequestRegistrationUseCase<R, M>
where
    R: UserRepository + KeyValueStore + Sync,
    M: Mailer + Sync,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> RequestRegistrationUseCase<R, M>
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

    pub async fn execute(
        &self,
        input: RequestRegistrationInput,
    ) -> AuthResult<RequestRegistrationOutput> {
        if [&input.name, &input.email, &input.tax_id, &input.password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }

        let name = DisplayName::new(&input.name).map_err(AuthError::validation)?;
        let email = Email::new(&input.email).map_err(AuthError::validation)?;
        let tax_id = TaxId::new(&input.tax_id).map_err(AuthError::validation)?;

        if self.repo.user_exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password, &self.config.password_policy)
            .map_err(AuthError::validation)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let draft = RegistrationDraft {
            name,
            email: email.clone(),
            tax_id,
            password_hash: password_hash.as_phc_string().to_string(),
        };

        let pending = PendingOtps::new(&*self.repo, &self.config, OtpPurpose::Registration);
        let code = pending.stash(&email, draft).await?;

        let mail = OutgoingMail::otp(
            email.clone(),
            OtpPurpose::Registration.mail_subject(),
            code.as_str(),
        );
        self.mailer.send(&mail).await?;

        let continuation_token =
            tokens::issue_continuation(&self.config, &email, OtpPurpose::Registration)?;

        tracing::info!(email = %email, purpose = %OtpPurpose::Registration, "Registration requested");

        Ok(RequestRegistrationOutput { continuation_token })
    }
}
