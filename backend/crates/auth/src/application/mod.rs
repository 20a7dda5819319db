//! Application Layer
//!
//! Use cases and application services.

pub mod approval_queue;
pub mod check_session;
pub mod config;
pub mod confirm_registration;
pub mod confirm_reset;
pub mod pending;
pub mod provision_admin;
pub mod request_registration;
pub mod request_reset;
pub mod sign_in;
pub mod tokens;

// Re-exports
pub use approval_queue::ApprovalQueueUseCase;
pub use check_session::{CheckSessionUseCase, GuardedAccount};
pub use config::AuthConfig;
pub use confirm_registration::ConfirmRegistrationUseCase;
pub use confirm_reset::{ConfirmResetInput, ConfirmResetUseCase};
pub use provision_admin::{ProvisionAdminUseCase, ProvisionOutcome};
pub use request_registration::{
    RequestRegistrationInput, RequestRegistrationOutput, RequestRegistrationUseCase,
};
pub use request_reset::{RequestResetOutput, RequestResetUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
