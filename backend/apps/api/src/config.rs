//! Server Configuration
//!
//! Environment-driven settings for the binary. Domain knobs end up in
//! `auth::AuthConfig`; everything else (port, database, CORS, mail, admin
//! seed) stays here.

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::infra::mail::{DEFAULT_MAIL_API_URL, HttpMailerConfig};
use platform::cookie::SameSite;
use platform::password::PasswordPolicy;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_SESSION_TTL_SECS: u64 = 15 * 60;

pub struct ServerConfig {
    pub port: u16,
    /// `None` selects the in-memory stores (debug builds only)
    pub database_url: Option<String>,
    /// CORS origins; credentials are allowed for each
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    /// `None` selects the log mailer
    pub mail: Option<HttpMailerConfig>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from any variable source. `debug` relaxes the release-only
    /// requirements (database, signing secret, secure cookie).
    pub fn from_lookup<F>(lookup: F, debug: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PORT is not a port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = var("DATABASE_URL");
        if database_url.is_none() && !debug {
            bail!("DATABASE_URL must be set in release builds");
        }

        let frontend_origins = var("FRONTEND_URL")
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let mut auth = match var("JWT_SECRET") {
            Some(secret) => AuthConfig {
                jwt_secret: secret.into_bytes(),
                ..AuthConfig::default()
            },
            None if debug => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this process");
                AuthConfig::with_random_secret()
            }
            None => bail!("JWT_SECRET must be set in release builds"),
        };

        auth.session_ttl = match var("SESSION_TTL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("SESSION_TTL_SECS is not a number: {raw}"))?,
            ),
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        auth.cookie_secure = match var("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("COOKIE_SECURE: {raw}"))?,
            None => !debug,
        };

        if let Some(raw) = var("COOKIE_SAME_SITE") {
            auth.cookie_same_site = SameSite::parse(&raw)
                .with_context(|| format!("COOKIE_SAME_SITE must be strict, lax or none: {raw}"))?;
        }

        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        if let Some(raw) = var("PASSWORD_POLICY") {
            auth.password_policy = parse_password_policy(&raw)
                .with_context(|| format!("PASSWORD_POLICY must be lenient or nist: {raw}"))?;
        }

        let mail = match (var("MAIL_API_KEY"), var("MAIL_SENDER")) {
            (Some(api_key), Some(sender_email)) => Some(HttpMailerConfig {
                api_url: var("MAIL_API_URL").unwrap_or_else(|| DEFAULT_MAIL_API_URL.to_string()),
                api_key,
                sender_email,
                sender_name: var("MAIL_SENDER_NAME"),
            }),
            _ => None,
        };

        Ok(Self {
            port,
            database_url,
            frontend_origins,
            auth,
            mail,
            admin_email: var("ADMIN_EMAIL"),
            admin_password: lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()),
        })
    }
}

fn parse_password_policy(raw: &str) -> Option<PasswordPolicy> {
    match raw.to_ascii_lowercase().as_str() {
        "lenient" => Some(PasswordPolicy::lenient()),
        "nist" => Some(PasswordPolicy::default()),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
