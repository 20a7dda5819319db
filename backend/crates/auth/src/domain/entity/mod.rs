//! Entity Module

pub mod admin;
pub mod pending;
pub mod user;
