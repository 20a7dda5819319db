//! Portal Client
//!
//! Typed client for the account portal API plus the state a UI needs to
//! drive it:
//! - `ApiClient` - reqwest client with a cookie store and a fixed timeout
//! - `UserApi` / `AdminApi` - one method per endpoint
//! - `SessionStore` - loading / authenticated / anonymous / error
//! - `RegistrationFlow`, `PasswordResetFlow`, `ApprovalBoard` - form models

pub mod admin;
pub mod api;
pub mod approval;
pub mod errors;
pub mod registration;
pub mod reset;
pub mod state;
pub mod types;
pub mod users;

#[cfg(test)]
mod mock;

pub use admin::AdminApi;
pub use api::ApiClient;
pub use approval::ApprovalBoard;
pub use errors::ClientError;
pub use registration::{RegistrationFlow, RegistrationForm, RegistrationStep};
pub use reset::{PasswordResetFlow, ResetStep};
pub use state::{AdminSession, SessionState, SessionStore, UserSession};
pub use types::{Admin, User};
pub use users::UserApi;
