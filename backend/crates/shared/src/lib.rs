//! Shared Kernel
//!
//! Vocabulary every backend crate agrees on:
//! - [`error::AppError`], the error shape the portal answers with
//! - [`id::UserId`] / [`id::AdminId`], account identifiers that cannot be mixed up

pub mod error;
pub mod id;
