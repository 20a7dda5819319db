use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Which flow a pending OTP or continuation token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    #[display("registration")]
    Registration,
    #[display("password_reset")]
    PasswordReset,
}

impl OtpPurpose {
    /// Key prefix in the pending-OTP store
    #[inline]
    pub const fn namespace(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "registration",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }

    #[inline]
    pub const fn mail_subject(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "Registration OTP",
            OtpPurpose::PasswordReset => "Password Reset OTP",
        }
    }

    /// Message when no pending record exists for the email
    #[inline]
    pub const fn session_expired_message(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "OTP session expired, register again",
            OtpPurpose::PasswordReset => "OTP expired, try again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&OtpPurpose::PasswordReset).unwrap(),
            "\"password_reset\""
        );
        assert_eq!(OtpPurpose::Registration.to_string(), "registration");
        assert_eq!(OtpPurpose::PasswordReset.namespace(), "password_reset");
    }
}
