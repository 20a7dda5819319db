//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) behind a configurable policy
//! - Signed token encoding (HS256 JWT)
//! - Cookie and bearer credential handling
//! - Small cryptographic helpers (constant-time compare, numeric codes)

pub mod cookie;
pub mod crypto;
pub mod jwt;
pub mod password;
