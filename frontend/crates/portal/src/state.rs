//! Session state for one role. The store hydrates once from the `me` endpoint
//! and then follows login and logout. Only the account view is held in
//! memory; the session token itself stays in the `HttpOnly` cookie.

use std::future::Future;

use crate::errors::ClientError;
use crate::types::{Admin, User};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState<T> {
    /// Hydration has not finished
    Loading,
    Authenticated(T),
    Anonymous,
    /// The server could not be asked (network, timeout, bad reply)
    Error(String),
}

pub type UserSession = SessionStore<User>;
pub type AdminSession = SessionStore<Admin>;

#[derive(Clone, Debug)]
pub struct SessionStore<T> {
    state: SessionState<T>,
}

impl<T: Clone> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState<T> {
        &self.state
    }

    pub fn account(&self) -> Option<&T> {
        match &self.state {
            SessionState::Authenticated(account) => Some(account),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// Resolve the current session from a `me` call. Any HTTP refusal means
    /// there is no session; transport failures are kept as an error.
    pub async fn hydrate<F>(&mut self, me: F) -> &SessionState<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        self.state = match me.await {
            Ok(account) => SessionState::Authenticated(account),
            Err(ClientError::Http { .. }) => SessionState::Anonymous,
            Err(err) => {
                tracing::warn!(error = %err, "Session hydration failed");
                SessionState::Error(err.message_or("Unable to load session"))
            }
        };
        &self.state
    }

    /// Apply a login attempt. A failure leaves the store anonymous and
    /// returns the message to show.
    pub async fn login<F>(&mut self, attempt: F) -> Result<T, String>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        match attempt.await {
            Ok(account) => {
                self.state = SessionState::Authenticated(account.clone());
                Ok(account)
            }
            Err(err) => {
                self.state = SessionState::Anonymous;
                Err(err.message_or("Login failed"))
            }
        }
    }

    /// Apply a logout. On failure the session is kept as it was.
    pub async fn logout<F, R>(&mut self, attempt: F) -> Result<(), String>
    where
        F: Future<Output = Result<R, ClientError>>,
    {
        match attempt.await {
            Ok(_) => {
                self.state = SessionState::Anonymous;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "Logout failed");
                Err("Logout failed".to_string())
            }
        }
    }
}
