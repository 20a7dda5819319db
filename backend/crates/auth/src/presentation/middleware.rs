//! Session Guard Middleware
//!
//! Resolves the session credential (cookie first, then bearer header) to an
//! account and inserts it into the request extensions as `Extension<A>`.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{CheckSessionUseCase, GuardedAccount};
use crate::domain::repository::{AdminRepository, UserRepository};
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<R, A> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    _account: PhantomData<fn() -> A>,
}

impl<R, A> AuthMiddlewareState<R, A> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            config,
            _account: PhantomData,
        }
    }
}

impl<R, A> Clone for AuthMiddlewareState<R, A> {
    fn clone(&self) -> Self {
        Self::new(self.repo.clone(), self.config.clone())
    }
}

/// Middleware that requires a valid session for account kind `A`
pub async fn require_session<R, A>(
    State(state): State<AuthMiddlewareState<R, A>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + AdminRepository + Send + Sync + 'static,
    A: GuardedAccount,
{
    let credential =
        platform::cookie::extract_credential(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let account: A = use_case.execute(credential.as_deref()).await?;

    req.extensions_mut().insert(account);

    Ok(next.run(req).await)
}
