//! Provision Admin Use Case
//!
//! Boot-time creation of the operator account from configuration.
//! Idempotent: an existing admin with the email is left untouched.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyPresent,
    /// Credentials not configured
    Skipped,
}

pub struct ProvisionAdminUseCase<R>
where
    R: AdminRepository + Sync,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ProvisionAdminUseCase<R>
where
    R: AdminRepository + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> AuthResult<ProvisionOutcome> {
        let (Some(email), Some(password)) = (email, password) else {
            tracing::warn!("ADMIN_EMAIL / ADMIN_PASSWORD not set, skipping admin provisioning");
            return Ok(ProvisionOutcome::Skipped);
        };

        let email = Email::new(&email).map_err(AuthError::validation)?;

        if self.repo.find_admin_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Admin already provisioned");
            return Ok(ProvisionOutcome::AlreadyPresent);
        }

        let raw_password = RawPassword::new(password, &self.config.password_policy)
            .map_err(AuthError::validation)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let admin = Admin::new(email, password_hash);
        self.repo.create_admin(&admin).await?;

        tracing::info!(admin_id = %admin.admin_id, email = %admin.email, "Admin provisioned");

        Ok(ProvisionOutcome::Created)
    }
}
