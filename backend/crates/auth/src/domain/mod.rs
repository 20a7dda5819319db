//! Domain Layer
//!
//! Contains entities, value objects, and the storage and mail traits.

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{admin::Admin, user::User};
pub use mailer::{Mailer, OutgoingMail};
pub use repository::{AccountStore, AdminRepository, KeyValueStore, UserRepository};
