//! Signed Token Codec
//!
//! HS256 JSON Web Tokens with exact expiry checks (no leeway). Claim types
//! are owned by the caller; they only need an `exp` field in seconds.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

/// Token verification failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature is valid but `exp` has passed
    #[error("Token has expired")]
    Expired,

    /// Anything else: bad signature, malformed, wrong claims
    #[error("Token is invalid: {0}")]
    Invalid(String),

    /// Encoding failed (claims could not be serialized)
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Encoder/decoder bound to one shared secret
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn encode<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    pub fn decode<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        jsonwebtoken::decode::<C>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCodec").field("secret", &"[REDACTED]").finish()
    }
}

/// Current Unix time in seconds
pub fn now_secs() -> u64 {
    jsonwebtoken::get_current_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Claims {
        sub: String,
        exp: u64,
    }

    #[test]
    fn test_encode_decode() {
        let codec = JwtCodec::new(b"secret");
        let claims = Claims {
            sub: "abc".to_string(),
            exp: now_secs() + 60,
        };
        let token = codec.encode(&claims).unwrap();
        let decoded: Claims = codec.decode(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token() {
        let codec = JwtCodec::new(b"secret");
        let claims = Claims {
            sub: "abc".to_string(),
            exp: now_secs() - 1,
        };
        let token = codec.encode(&claims).unwrap();
        let result = codec.decode::<Claims>(&token);
        assert_eq!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret() {
        let token = JwtCodec::new(b"one")
            .encode(&Claims {
                sub: "abc".to_string(),
                exp: now_secs() + 60,
            })
            .unwrap();
        let result = JwtCodec::new(b"two").decode::<Claims>(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_token() {
        let codec = JwtCodec::new(b"secret");
        assert!(matches!(
            codec.decode::<Claims>("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let codec = JwtCodec::new(b"super-secret");
        assert!(!format!("{:?}", codec).contains("super-secret"));
    }
}
