//! One-Time Passcode
//!
//! Six decimal digits in 100000..=999999, compared in constant time.

use platform::crypto::{constant_time_eq, random_numeric_code};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const OTP_DIGITS: u32 = 6;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draw a fresh code from the OS RNG
    pub fn generate() -> Self {
        Self(random_numeric_code(OTP_DIGITS))
    }

    /// Compare against user input (surrounding whitespace ignored)
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), submitted.trim().as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OtpCode").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..200 {
            let code = OtpCode::generate();
            assert_eq!(code.as_str().len(), OTP_DIGITS as usize);
            let value: u32 = code.as_str().parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_matches() {
        let code = OtpCode("123456".to_string());
        assert!(code.matches("123456"));
        assert!(code.matches(" 123456\n"));
        assert!(!code.matches("123457"));
        assert!(!code.matches("12345"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_debug_redacted() {
        let code = OtpCode("654321".to_string());
        assert!(!format!("{:?}", code).contains("654321"));
    }
}
