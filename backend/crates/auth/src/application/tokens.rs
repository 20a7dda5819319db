//! Session and Continuation Tokens
//!
//! Both are HS256 JWTs signed with `AuthConfig::jwt_secret`.
//!
//! - Session: `{sub, role, iat, exp}`, carried in the session cookie or a
//!   bearer header. Stateless; logout only clears the cookie.
//! - Continuation: `{email, purpose, iat, exp}`, returned by the request
//!   step of registration or reset and echoed back with the OTP.

use platform::jwt::{TokenError, now_secs};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{
    account_role::AccountRole, email::Email, otp_purpose::OtpPurpose,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: AccountRole,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationClaims {
    pub email: String,
    pub purpose: OtpPurpose,
    pub iat: u64,
    pub exp: u64,
}

pub fn issue_session(config: &AuthConfig, account_id: Uuid, role: AccountRole) -> AuthResult<String> {
    let iat = now_secs();
    let claims = SessionClaims {
        sub: account_id,
        role,
        iat,
        exp: iat + config.session_ttl.as_secs(),
    };

    config
        .jwt()
        .encode(&claims)
        .map_err(|e| AuthError::Internal(e.to_string()))
}

/// Decode a session token issued for `role`
///
/// Expired → `SessionExpired`; anything else, including a token issued to the
/// other role → `SessionInvalid`.
pub fn verify_session(
    config: &AuthConfig,
    token: &str,
    role: AccountRole,
) -> AuthResult<SessionClaims> {
    let claims: SessionClaims = config.jwt().decode(token).map_err(|e| match e {
        TokenError::Expired => AuthError::SessionExpired,
        other => {
            tracing::debug!(error = %other, "Session token verification failed");
            AuthError::SessionInvalid
        }
    })?;

    if claims.role != role {
        tracing::warn!(
            expected = %role,
            actual = %claims.role,
            "Session token presented to the wrong guard"
        );
        return Err(AuthError::SessionInvalid);
    }

    Ok(claims)
}

pub fn issue_continuation(
    config: &AuthConfig,
    email: &Email,
    purpose: OtpPurpose,
) -> AuthResult<String> {
    let iat = now_secs();
    let claims = ContinuationClaims {
        email: email.as_str().to_string(),
        purpose,
        iat,
        exp: iat + config.continuation_ttl.as_secs(),
    };

    config
        .jwt()
        .encode(&claims)
        .map_err(|e| AuthError::Internal(e.to_string()))
}

/// Recover the email bound to a continuation token for `purpose`
pub fn verify_continuation(
    config: &AuthConfig,
    token: &str,
    purpose: OtpPurpose,
) -> AuthResult<Email> {
    let claims: ContinuationClaims = config
        .jwt()
        .decode(token)
        .map_err(|_| AuthError::InvalidToken)?;

    if claims.purpose != purpose {
        return Err(AuthError::InvalidToken);
    }

    Email::new(&claims.email).map_err(|_| AuthError::InvalidToken)
}
