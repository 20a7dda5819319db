//! Admin endpoints under `/api/admin`.

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::types::{Admin, AdminEnvelope, LoginRequest, MessageResponse, UnverifiedUsersResponse, User};

#[trait_variant::make(AdminApi: Send)]
pub trait LocalAdminApi {
    async fn login(&self, email: &str, password: &str) -> Result<AdminEnvelope, ClientError>;

    async fn me(&self) -> Result<Admin, ClientError>;

    async fn logout(&self) -> Result<MessageResponse, ClientError>;

    /// Verified users waiting for approval, oldest first
    async fn unverified_users(&self) -> Result<Vec<User>, ClientError>;

    async fn verify_user(&self, user_id: &str) -> Result<MessageResponse, ClientError>;
}

impl AdminApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AdminEnvelope, ClientError> {
        self.post_json("/api/admin/admin-login", &LoginRequest { email, password })
            .await
    }

    async fn me(&self) -> Result<Admin, ClientError> {
        self.get_json("/api/admin/me").await
    }

    async fn logout(&self) -> Result<MessageResponse, ClientError> {
        self.post_empty("/api/admin/logout").await
    }

    async fn unverified_users(&self) -> Result<Vec<User>, ClientError> {
        let response: UnverifiedUsersResponse = self.get_json("/api/admin/unverified-users").await?;
        Ok(response.users)
    }

    async fn verify_user(&self, user_id: &str) -> Result<MessageResponse, ClientError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ClientError::Http {
                status: 400,
                message: "User id is required.".to_string(),
            });
        }

        self.put_empty(&format!("/api/admin/verify-user/{user_id}"))
            .await
    }
}
