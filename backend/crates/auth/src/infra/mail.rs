//! Mailer Implementations
//!
//! - `HttpMailer`: transactional mail HTTP API (Brevo `v3/smtp/email` shape)
//! - `LogMailer`: writes the message to the log; development only
//! - `CapturingMailer`: records messages in memory for tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

use crate::domain::mailer::{Mailer, OutgoingMail};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub const DEFAULT_MAIL_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

const MAIL_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// HTTP API
// ============================================================================

#[derive(Clone)]
pub struct HttpMailerConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
}

impl std::fmt::Debug for HttpMailerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMailerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailBody<'a> {
    sender: MailAddress<'a>,
    to: Vec<MailAddress<'a>>,
    subject: &'a str,
    text_content: &'a str,
}

#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    config: Arc<HttpMailerConfig>,
}

impl HttpMailer {
    pub fn new(config: HttpMailerConfig) -> AuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(MAIL_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Internal(format!("Mail client init failed: {e}")))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> AuthResult<()> {
        let body = SendMailBody {
            sender: MailAddress {
                email: &self.config.sender_email,
                name: self.config.sender_name.as_deref(),
            },
            to: vec![MailAddress {
                email: mail.to.as_str(),
                name: None,
            }],
            subject: &mail.subject,
            text_content: &mail.text,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Mail(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(to = %mail.to, subject = %mail.subject, "Mail accepted");
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(AuthError::Mail(format!(
            "mail API rejected message (status={}): {}",
            status.as_u16(),
            detail
        )))
    }
}

// ============================================================================
// Log
// ============================================================================

/// Logs the message body, OTP code included
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> AuthResult<()> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            text = %mail.text,
            "Mail not configured, logging message instead"
        );
        Ok(())
    }
}

// ============================================================================
// Startup choice
// ============================================================================

/// Mailer picked from configuration at boot
#[derive(Clone)]
pub enum ConfiguredMailer {
    Http(HttpMailer),
    Log(LogMailer),
}

impl ConfiguredMailer {
    /// HTTP delivery when credentials are present, log output otherwise
    pub fn from_config(config: Option<HttpMailerConfig>) -> AuthResult<Self> {
        match config {
            Some(config) => Ok(Self::Http(HttpMailer::new(config)?)),
            None => {
                tracing::warn!("MAIL_API_KEY / MAIL_SENDER not set, OTP mail goes to the log");
                Ok(Self::Log(LogMailer))
            }
        }
    }
}

impl Mailer for ConfiguredMailer {
    async fn send(&self, mail: &OutgoingMail) -> AuthResult<()> {
        match self {
            Self::Http(mailer) => mailer.send(mail).await,
            Self::Log(mailer) => mailer.send(mail).await,
        }
    }
}

// ============================================================================
// Capturing (tests)
// ============================================================================

#[derive(Clone, Default)]
pub struct CapturingMailer {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    failing: bool,
}

impl CapturingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Code from the most recent message to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        let to = Email::new(to).ok()?;
        self.sent()
            .iter()
            .rev()
            .find(|mail| mail.to == to)
            .and_then(|mail| mail.text.strip_prefix("Your OTP: "))
            .map(str::to_string)
    }
}

impl Mailer for CapturingMailer {
    async fn send(&self, mail: &OutgoingMail) -> AuthResult<()> {
        if self.failing {
            return Err(AuthError::Mail("capturing mailer set to fail".to_string()));
        }
        self.sent
            .lock()
            .map_err(|_| AuthError::Internal("mail capture lock poisoned".to_string()))?
            .push(mail.clone());
        Ok(())
    }
}
