//! Cryptographic Utilities

use rand::{Rng, rngs::OsRng};

/// Generate a numeric code with exactly `digits` digits and no leading zero.
///
/// Drawn from the OS RNG; `digits` must be between 1 and 9.
pub fn random_numeric_code(digits: u32) -> String {
    assert!((1..=9).contains(&digits), "digits must be in 1..=9");
    let low = 10u32.pow(digits - 1);
    let high = 10u32.pow(digits);
    OsRng.gen_range(low..high).to_string()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_numeric_code_shape() {
        for _ in 0..200 {
            let code = random_numeric_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn test_constant_time_eq() {
        let a = [1u8, 2, 3, 4];
        let b = [1u8, 2, 3, 4];
        let c = [1u8, 2, 3, 5];
        assert!(constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &c));
        assert!(!constant_time_eq(&a, &a[..3]));
    }
}
