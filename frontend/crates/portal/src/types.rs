//! Wire types shared by the user and admin clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account as the API returns it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub gstin: String,
    pub is_verified: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register and forget-password replies: the token for the OTP step.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ContinuationResponse {
    pub message: String,
    pub token: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdminEnvelope {
    pub message: String,
    pub admin: Admin,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UnverifiedUsersResponse {
    pub users: Vec<User>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub gstin: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct OtpRequest<'a> {
    pub otp: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct ResetRequest<'a> {
    pub otp: &'a str,
    pub password: &'a str,
}
