//! User endpoints under `/api/users`. Paths live here and nowhere else; the
//! server enforces authorization.

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::types::{
    ContinuationResponse, EmailRequest, LoginRequest, MessageResponse, OtpRequest,
    RegisterRequest, ResetRequest, User, UserEnvelope,
};

#[trait_variant::make(UserApi: Send)]
pub trait LocalUserApi {
    async fn register(&self, request: &RegisterRequest) -> Result<ContinuationResponse, ClientError>;

    async fn verify_otp(&self, token: &str, otp: &str) -> Result<UserEnvelope, ClientError>;

    async fn login(&self, email: &str, password: &str) -> Result<UserEnvelope, ClientError>;

    async fn me(&self) -> Result<User, ClientError>;

    async fn logout(&self) -> Result<MessageResponse, ClientError>;

    async fn forget_password(&self, email: &str) -> Result<ContinuationResponse, ClientError>;

    async fn reset_password(
        &self,
        token: &str,
        otp: &str,
        password: &str,
    ) -> Result<MessageResponse, ClientError>;
}

impl UserApi for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<ContinuationResponse, ClientError> {
        self.post_json("/api/users/register", request).await
    }

    async fn verify_otp(&self, token: &str, otp: &str) -> Result<UserEnvelope, ClientError> {
        self.post_json(&format!("/api/users/verifyOtp/{token}"), &OtpRequest { otp })
            .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserEnvelope, ClientError> {
        self.post_json("/api/users/login", &LoginRequest { email, password })
            .await
    }

    async fn me(&self) -> Result<User, ClientError> {
        self.get_json("/api/users/me").await
    }

    async fn logout(&self) -> Result<MessageResponse, ClientError> {
        self.get_json("/api/users/logout").await
    }

    async fn forget_password(&self, email: &str) -> Result<ContinuationResponse, ClientError> {
        self.post_json("/api/users/forget", &EmailRequest { email })
            .await
    }

    async fn reset_password(
        &self,
        token: &str,
        otp: &str,
        password: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.post_json(
            &format!("/api/users/reset-password/{token}"),
            &ResetRequest { otp, password },
        )
        .await
    }
}
