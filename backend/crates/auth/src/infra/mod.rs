//! Infrastructure Layer
//!
//! Storage and mail implementations of the domain traits.

pub mod mail;
pub mod memory;
pub mod postgres;

pub use mail::{CapturingMailer, ConfiguredMailer, HttpMailer, HttpMailerConfig, LogMailer};
pub use memory::{InMemoryAuthRepository, InMemoryKeyValueStore};
pub use postgres::PgAuthRepository;
