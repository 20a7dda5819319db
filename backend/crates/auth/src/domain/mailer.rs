//! Outbound Mail
//!
//! The only message this system sends is an OTP code.

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: Email,
    pub subject: String,
    pub text: String,
}

impl OutgoingMail {
    pub fn otp(to: Email, subject: &str, code: &str) -> Self {
        Self {
            to,
            subject: subject.to_string(),
            text: format!("Your OTP: {}", code),
        }
    }
}

/// Mail delivery trait; failures are `AuthError::Mail`
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, mail: &OutgoingMail) -> AuthResult<()>;
}
