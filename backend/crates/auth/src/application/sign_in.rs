//! Sign In Use Case
//!
//! Authenticates a user or an admin and issues a session token.
//!
//! The two roles report credential failures differently: users get one
//! generic message for unknown email and wrong password, admins learn which
//! of the two was wrong.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens;
use crate::domain::entity::{admin::Admin, user::User};
use crate::domain::repository::{AdminRepository, UserRepository};
use crate::domain::value_object::{
    account_role::AccountRole, email::Email, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput<A> {
    pub account: A,
    /// Session token for cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository + AdminRepository + Sync,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + AdminRepository + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn sign_in_user(&self, input: SignInInput) -> AuthResult<SignInOutput<User>> {
        require_credentials(&input)?;

        // A malformed email cannot belong to anyone
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::submitted(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_verified {
            return Err(AuthError::EmailNotVerified);
        }

        if !user.is_approved {
            return Err(AuthError::ApprovalPending);
        }

        let session_token =
            tokens::issue_session(&self.config, user.user_id.into_uuid(), AccountRole::User)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            account: user,
            session_token,
        })
    }

    pub async fn sign_in_admin(&self, input: SignInInput) -> AuthResult<SignInOutput<Admin>> {
        require_credentials(&input)?;

        let email = Email::new(&input.email).map_err(|_| AuthError::AdminNotFound)?;

        let admin = self
            .repo
            .find_admin_by_email(&email)
            .await?
            .ok_or(AuthError::AdminNotFound)?;

        let raw_password = RawPassword::submitted(input.password);
        if !admin.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::AdminInvalidPassword);
        }

        let session_token =
            tokens::issue_session(&self.config, admin.admin_id.into_uuid(), AccountRole::Admin)?;

        tracing::info!(admin_id = %admin.admin_id, "Admin signed in");

        Ok(SignInOutput {
            account: admin,
            session_token,
        })
    }
}

fn require_credentials(input: &SignInInput) -> AuthResult<()> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AuthError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}
