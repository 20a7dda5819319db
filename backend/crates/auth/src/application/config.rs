//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::jwt::JwtCodec;
use platform::password::PasswordPolicy;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC secret for session and continuation tokens
    pub jwt_secret: Vec<u8>,
    /// Session token and cookie lifetime
    pub session_ttl: Duration,
    /// How long an emailed code stays valid
    pub otp_ttl: Duration,
    /// Continuation token lifetime
    pub continuation_ttl: Duration,
    /// How long an expired pending record is kept so it reports "expired"
    /// rather than "session expired"
    pub pending_retention_grace: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Rules for newly chosen passwords; any non-blank secret unless a
    /// deployment opts into the NIST policy
    pub password_policy: PasswordPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "token".to_string(),
            jwt_secret: Vec::new(),
            session_ttl: Duration::from_secs(15 * 60),
            otp_ttl: Duration::from_secs(5 * 60),
            continuation_ttl: Duration::from_secs(5 * 60),
            pending_retention_grace: Duration::from_secs(10 * 60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            password_policy: PasswordPolicy::lenient(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn jwt(&self) -> JwtCodec {
        JwtCodec::new(&self.jwt_secret)
    }

    /// TTL handed to the key-value store for pending OTP records
    pub fn pending_retention(&self) -> Duration {
        self.otp_ttl + self.pending_retention_grace
    }

    /// Session cookie attributes
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: Some(self.session_ttl.as_secs()),
            ..CookieConfig::default()
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("jwt_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("otp_ttl", &self.otp_ttl)
            .field("continuation_ttl", &self.continuation_ttl)
            .field("pending_retention_grace", &self.pending_retention_grace)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_policy", &self.password_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "token");
        assert_eq!(config.otp_ttl, Duration::from_secs(300));
        assert_eq!(config.continuation_ttl, Duration::from_secs(300));
        assert_eq!(config.pending_retention(), Duration::from_secs(900));
        assert!(config.cookie_secure);
        assert_eq!(config.password_policy, PasswordPolicy::lenient());
    }

    #[test]
    fn test_development_has_secret_and_insecure_cookie() {
        let config = AuthConfig::development();
        assert_eq!(config.jwt_secret.len(), 32);
        assert!(!config.cookie_secure);
        assert!(!format!("{:?}", config).contains(&format!("{:?}", config.jwt_secret)));
    }

    #[test]
    fn test_session_cookie_matches_ttl() {
        let config = AuthConfig {
            session_ttl: Duration::from_secs(600),
            ..AuthConfig::development()
        };
        let cookie = config.session_cookie().build_set_cookie("abc");
        assert!(cookie.starts_with("token=abc"));
        assert!(cookie.contains("Max-Age=600"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }
}
