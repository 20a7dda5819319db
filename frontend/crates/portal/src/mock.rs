//! Scripted stand-in for the portal API used by the flow tests.

use std::sync::Mutex;

use chrono::Utc;

use crate::admin::AdminApi;
use crate::errors::ClientError;
use crate::types::{
    Admin, AdminEnvelope, ContinuationResponse, MessageResponse, RegisterRequest, User,
    UserEnvelope,
};
use crate::users::UserApi;

const TOKEN: &str = "continuation-token";

#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<String>>,
    failure: Mutex<Option<ClientError>>,
    queue: Vec<User>,
}

pub fn sample_user(id: &str) -> User {
    let now = Utc::now();
    User {
        id: id.to_string(),
        name: "Asha Rao".to_string(),
        email: format!("{id}@example.com"),
        gstin: "22AAAAA0000A1Z5".to_string(),
        is_verified: true,
        is_approved: false,
        created_at: now,
        updated_at: now,
    }
}

fn sample_admin() -> Admin {
    let now = Utc::now();
    Admin {
        id: "a1".to_string(),
        email: "ops@portal.test".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue(queue: Vec<User>) -> Self {
        Self {
            queue,
            ..Self::default()
        }
    }

    /// The next call fails with `err`
    pub fn fail_next(&self, err: ClientError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl UserApi for MockApi {
    async fn register(&self, request: &RegisterRequest) -> Result<ContinuationResponse, ClientError> {
        self.record(format!("register {}", request.email))?;
        Ok(ContinuationResponse {
            message: "OTP sent successfully. Verify to complete registration.".to_string(),
            token: TOKEN.to_string(),
        })
    }

    async fn verify_otp(&self, token: &str, otp: &str) -> Result<UserEnvelope, ClientError> {
        self.record(format!("verify_otp {token} {otp}"))?;
        Ok(UserEnvelope {
            message: "Email verified. Waiting for admin approval.".to_string(),
            user: sample_user("u1"),
        })
    }

    async fn login(&self, email: &str, _password: &str) -> Result<UserEnvelope, ClientError> {
        self.record(format!("login {email}"))?;
        Ok(UserEnvelope {
            message: "Login successful".to_string(),
            user: sample_user("u1"),
        })
    }

    async fn me(&self) -> Result<User, ClientError> {
        self.record("me".to_string())?;
        Ok(sample_user("u1"))
    }

    async fn logout(&self) -> Result<MessageResponse, ClientError> {
        self.record("logout".to_string())?;
        Ok(message("Logged out successfully"))
    }

    async fn forget_password(&self, email: &str) -> Result<ContinuationResponse, ClientError> {
        self.record(format!("forget_password {email}"))?;
        Ok(ContinuationResponse {
            message: "OTP sent for password reset".to_string(),
            token: TOKEN.to_string(),
        })
    }

    async fn reset_password(
        &self,
        token: &str,
        otp: &str,
        _password: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.record(format!("reset_password {token} {otp}"))?;
        Ok(message("Password reset successful"))
    }
}

impl AdminApi for MockApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AdminEnvelope, ClientError> {
        self.record(format!("admin_login {email}"))?;
        Ok(AdminEnvelope {
            message: "Admin login successful".to_string(),
            admin: sample_admin(),
        })
    }

    async fn me(&self) -> Result<Admin, ClientError> {
        self.record("admin_me".to_string())?;
        Ok(sample_admin())
    }

    async fn logout(&self) -> Result<MessageResponse, ClientError> {
        self.record("admin_logout".to_string())?;
        Ok(message("Admin logged out"))
    }

    async fn unverified_users(&self) -> Result<Vec<User>, ClientError> {
        self.record("unverified_users".to_string())?;
        Ok(self.queue.clone())
    }

    async fn verify_user(&self, user_id: &str) -> Result<MessageResponse, ClientError> {
        self.record(format!("verify_user {user_id}"))?;
        Ok(message("User approved successfully"))
    }
}
