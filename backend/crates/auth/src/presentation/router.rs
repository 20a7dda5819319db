//! Auth Router

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use kernel::error::AppError;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::application::config::AuthConfig;
use crate::domain::entity::{admin::Admin, user::User};
use crate::domain::mailer::Mailer;
use crate::domain::repository::AccountStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_session};

/// Routes under `/api/users`
pub fn user_router<R, M>(state: AuthAppState<R, M>) -> Router
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState::<R, User>::new(state.repo.clone(), state.config.clone());

    let guarded = Router::new()
        .route("/me", get(handlers::user_me))
        .route("/logout", get(handlers::user_logout::<R, M>))
        .route_layer(from_fn_with_state(guard, require_session::<R, User>));

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/verifyOtp/{token}", post(handlers::verify_otp::<R, M>))
        .route("/login", post(handlers::user_login::<R, M>))
        .route("/forget", post(handlers::forget_password::<R, M>))
        .route(
            "/reset-password/{token}",
            post(handlers::reset_password::<R, M>),
        )
        .merge(guarded)
        .with_state(state)
}

/// Routes under `/api/admin`
pub fn admin_router<R, M>(state: AuthAppState<R, M>) -> Router
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState::<R, Admin>::new(state.repo.clone(), state.config.clone());

    let guarded = Router::new()
        .route("/me", get(handlers::admin_me))
        .route(
            "/unverified-users",
            get(handlers::unverified_users::<R, M>),
        )
        .route(
            "/verify-user/{user_id}",
            put(handlers::verify_user::<R, M>),
        )
        .route("/logout", post(handlers::admin_logout::<R, M>))
        .route_layer(from_fn_with_state(guard, require_session::<R, Admin>));

    Router::new()
        .route("/admin-login", post(handlers::admin_login::<R, M>))
        .route("/login", post(handlers::admin_login::<R, M>))
        .merge(guarded)
        .with_state(state)
}

/// Whole portal API: liveness, both route groups, JSON 404 and panic guards
pub fn portal_router<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: AccountStore,
    M: Mailer + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, mailer, config);

    Router::new()
        .route("/", get(handlers::liveness))
        .nest("/api/users", user_router(state.clone()))
        .nest("/api/admin", admin_router(state))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
}

async fn route_not_found() -> Response {
    AppError::not_found("Route not found").into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"message":"Internal Server Error"}"#,
    )
        .into_response()
}
