//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ApprovalQueueUseCase, ConfirmRegistrationUseCase, ConfirmResetInput, ConfirmResetUseCase,
    RequestRegistrationInput, RequestRegistrationUseCase, RequestResetUseCase, SignInInput,
    SignInUseCase,
};
use crate::domain::entity::{admin::Admin, user::User};
use crate::domain::mailer::Mailer;
use crate::domain::repository::AccountStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AdminEnvelope, AdminResponse, ContinuationResponse, ForgetPasswordRequest, LoginRequest,
    MessageResponse, RegisterRequest, ResetPasswordRequest, UnverifiedUsersResponse,
    UserEnvelope, UserResponse, VerifyOtpRequest,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: derive would require `M: Clone`
impl<R, M> Clone for AuthAppState<R, M>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, M> AuthAppState<R, M>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    pub fn new(repo: R, mailer: M, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
        }
    }
}

/// Unwrap a JSON body, reporting a malformed one like any other bad input
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AuthError::Validation(rejection.body_text()))
}

// ============================================================================
// Liveness
// ============================================================================

/// GET /
pub async fn liveness() -> &'static str {
    "Portal API Running..."
}

// ============================================================================
// Registration
// ============================================================================

/// POST /api/users/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<ContinuationResponse>>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let req = body(payload)?;
    let use_case = RequestRegistrationUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RequestRegistrationInput {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            tax_id: req.gstin.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        })
        .await?;

    Ok(Json(ContinuationResponse {
        message: "OTP sent successfully. Verify to complete registration.".to_string(),
        token: output.continuation_token,
    }))
}

/// POST /api/users/verifyOtp/{token}
pub async fn verify_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(token): Path<String>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let req = body(payload)?;
    let use_case = ConfirmRegistrationUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(&token, req.otp.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(UserEnvelope {
        message: "Email verified. Waiting for admin approval.".to_string(),
        user: UserResponse::from(&user),
    }))
}

// ============================================================================
// Sign In / Sign Out
// ============================================================================

/// POST /api/users/login
pub async fn user_login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let req = body(payload)?;
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .sign_in_user(SignInInput {
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        })
        .await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserEnvelope {
            message: "Login successful".to_string(),
            user: UserResponse::from(&output.account),
        }),
    ))
}

/// POST /api/admin/admin-login
pub async fn admin_login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let req = body(payload)?;
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .sign_in_admin(SignInInput {
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        })
        .await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AdminEnvelope {
            message: "Admin login successful".to_string(),
            admin: AdminResponse::from(&output.account),
        }),
    ))
}

/// GET /api/users/logout (guarded)
pub async fn user_logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(user): Extension<User>,
) -> Response
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    tracing::info!(user_id = %user.user_id, "User signed out");
    clear_session(&state.config, "Logged out successfully")
}

/// POST /api/admin/logout (guarded)
pub async fn admin_logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(admin): Extension<Admin>,
) -> Response
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    tracing::info!(admin_id = %admin.admin_id, "Admin signed out");
    clear_session(&state.config, "Admin logged out")
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/users/forget
pub async fn forget_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    payload: Result<Json<ForgetPasswordRequest>, JsonRejection>,
) -> AuthResult<Json<ContinuationResponse>>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let req = body(payload)?;
    let use_case = RequestResetUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(req.email.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(ContinuationResponse {
        message: "OTP sent for password reset".to_string(),
        token: output.continuation_token,
    }))
}

/// POST /api/users/reset-password/{token}
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(token): Path<String>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let req = body(payload)?;
    let use_case = ConfirmResetUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ConfirmResetInput {
            continuation_token: token,
            otp: req.otp.unwrap_or_default(),
            new_password: req.password.unwrap_or_default(),
        })
        .await?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}

// ============================================================================
// Profiles (guarded)
// ============================================================================

/// GET /api/users/me
pub async fn user_me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// GET /api/admin/me
pub async fn admin_me(Extension(admin): Extension<Admin>) -> Json<AdminResponse> {
    Json(AdminResponse::from(&admin))
}

// ============================================================================
// Approval Queue (guarded, admin)
// ============================================================================

/// GET /api/admin/unverified-users
pub async fn unverified_users<R, M>(
    State(state): State<AuthAppState<R, M>>,
) -> AuthResult<Json<UnverifiedUsersResponse>>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ApprovalQueueUseCase::new(state.repo.clone());
    let users = use_case.list_unverified_users().await?;

    Ok(Json(UnverifiedUsersResponse {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}

/// PUT /api/admin/verify-user/{userId}
pub async fn verify_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(admin): Extension<Admin>,
    Path(user_id): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ApprovalQueueUseCase::new(state.repo.clone());
    let user = use_case.approve_user(&user_id).await?;

    tracing::info!(admin_id = %admin.admin_id, user_id = %user.user_id, "Approval recorded");

    Ok(Json(MessageResponse::new("User approved successfully")))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn clear_session(config: &AuthConfig, message: &str) -> Response {
    let cookie = config.session_cookie().build_delete_cookie();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new(message)),
    )
        .into_response()
}
