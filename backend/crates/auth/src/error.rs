//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` the portal answers with.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{AppError, ErrorKind};
use thiserror::Error;

use crate::domain::value_object::otp_purpose::OtpPurpose;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// The `Display` text of client-facing variants is the message the client
/// sees, so it is worded for end users.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// An account with this email already exists
    #[error("Email already exists")]
    EmailTaken,

    /// Continuation token is forged, expired, or minted for another flow
    #[error("Invalid or expired token")]
    InvalidToken,

    /// No pending OTP record for the email
    #[error("{}", .0.session_expired_message())]
    OtpSessionExpired(OtpPurpose),

    /// Pending record found but its code is past expiry
    #[error("OTP expired")]
    OtpExpired,

    /// Submitted code does not match
    #[error("Invalid OTP")]
    InvalidOtp,

    /// User login: unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Admin login: unknown email
    #[error("Admin not found")]
    AdminNotFound,

    /// Admin login: wrong password
    #[error("Incorrect email or password")]
    AdminInvalidPassword,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Account awaiting admin approval")]
    ApprovalPending,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Reset requested for an email with no account
    #[error("No user found")]
    NoAccountForEmail,

    /// No session credential on the request
    #[error("Unauthorized: Please login")]
    Unauthorized,

    /// Session token signature is valid but past expiry
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// Any other session token failure (bad signature, wrong role, ...)
    #[error("Authorization error. Please log in.")]
    SessionInvalid,

    /// Mail delivery failed
    #[error("Mail delivery failed: {0}")]
    Mail(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Wrap a value-object validation failure
    pub fn validation(err: AppError) -> Self {
        AuthError::Validation(err.message().to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::EmailTaken
            | AuthError::InvalidToken
            | AuthError::OtpSessionExpired(_)
            | AuthError::OtpExpired
            | AuthError::InvalidOtp
            | AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::AdminNotFound | AuthError::UserNotFound | AuthError::NoAccountForEmail => {
                ErrorKind::NotFound
            }
            AuthError::AdminInvalidPassword
            | AuthError::Unauthorized
            | AuthError::SessionExpired => ErrorKind::Unauthorized,
            AuthError::EmailNotVerified | AuthError::ApprovalPending => ErrorKind::Forbidden,
            AuthError::SessionInvalid
            | AuthError::Mail(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether the message may leak internals and must be replaced
    fn is_opaque(&self) -> bool {
        matches!(
            self,
            AuthError::Mail(_) | AuthError::Database(_) | AuthError::Internal(_)
        )
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        if self.is_opaque() {
            AppError::new(self.kind(), "Internal Server Error")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Mail(msg) => {
                tracing::error!(message = %msg, "OTP mail delivery failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::SessionInvalid => {
                tracing::error!("Session token rejected");
            }
            AuthError::InvalidCredentials | AuthError::AdminInvalidPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOtp => {
                tracing::warn!("Invalid OTP submitted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_categories() {
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::AdminNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::AdminInvalidPassword.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::ApprovalPending.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::EmailNotVerified.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::SessionExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::SessionInvalid.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AuthError::NoAccountForEmail.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_session_expired_message_depends_on_flow() {
        assert_eq!(
            AuthError::OtpSessionExpired(OtpPurpose::Registration).to_string(),
            "OTP session expired, register again"
        );
        assert_eq!(
            AuthError::OtpSessionExpired(OtpPurpose::PasswordReset).to_string(),
            "OTP expired, try again"
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AuthError::Internal("pool exhausted at 10.0.0.3".to_string());
        let app = err.to_app_error();
        assert_eq!(app.message(), "Internal Server Error");
        assert_eq!(app.kind(), ErrorKind::InternalServerError);

        let err = AuthError::Mail("smtp refused".to_string());
        assert_eq!(err.to_app_error().message(), "Internal Server Error");
    }

    #[test]
    fn test_client_errors_keep_message() {
        let app = AuthError::Validation("All fields are required".to_string()).to_app_error();
        assert_eq!(app.message(), "All fields are required");
        assert_eq!(app.status_code(), 400);
    }
}
