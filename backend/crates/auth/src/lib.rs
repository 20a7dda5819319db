//! Auth (Account Portal) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and mailer traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL, in-memory, and mail implementations
//! - `presentation/` - HTTP handlers, DTOs, router, session guards
//!
//! ## Features
//! - Registration gated by an emailed one-time code
//! - Password reset through the same one-time code mechanism
//! - Admin approval queue; unapproved users cannot sign in
//! - Signed, expiring session tokens in a cookie or bearer header
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional server-side pepper
//! - Pending registrations keep only the password hash
//! - One-time codes compared in constant time, single use
//! - Continuation tokens are bound to their flow (registration or reset)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::portal_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{AppError, AppResult, ErrorKind};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod mail {
    pub use crate::domain::mailer::{Mailer, OutgoingMail};
    pub use crate::infra::mail::*;
}
