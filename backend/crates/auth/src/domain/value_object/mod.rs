//! Value Object Module

pub mod account_role;
pub mod display_name;
pub mod email;
pub mod otp_code;
pub mod otp_purpose;
pub mod tax_id;
pub mod user_password;
