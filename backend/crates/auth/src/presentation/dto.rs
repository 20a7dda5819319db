//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional so a missing field reaches the use case and
//! is reported with the same message as a blank one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{admin::Admin, user::User};

// ============================================================================
// Requests
// ============================================================================

/// POST /api/users/register
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gstin: Option<String>,
    pub password: Option<String>,
}

/// POST /api/users/verifyOtp/{token}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub otp: Option<String>,
}

/// POST /api/users/login, POST /api/admin/admin-login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/users/forget
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForgetPasswordRequest {
    pub email: Option<String>,
}

/// POST /api/users/reset-password/{token}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub otp: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Accounts
// ============================================================================

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub gstin: String,
    pub is_verified: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            gstin: user.tax_id.as_str().to_string(),
            is_verified: user.is_verified,
            is_approved: user.is_approved,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.admin_id.to_string(),
            email: admin.email.as_str().to_string(),
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register and forget-password: the continuation token for the OTP step
#[derive(Debug, Clone, Serialize)]
pub struct ContinuationResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminEnvelope {
    pub message: String,
    pub admin: AdminResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnverifiedUsersResponse {
    pub users: Vec<UserResponse>,
}
