//! Tax Registration Number (GSTIN)
//!
//! Stored upper-cased with surrounding whitespace removed. The format is not
//! checked beyond being a short alphanumeric string; the admin reviewing the
//! account is the authority on whether it is genuine.

use kernel::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TAX_ID_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let value = raw.as_ref().trim().to_ascii_uppercase();

        if value.is_empty() {
            return Err(AppError::bad_request("GSTIN cannot be empty"));
        }

        if value.len() > TAX_ID_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "GSTIN must be at most {} characters",
                TAX_ID_MAX_LENGTH
            )));
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::bad_request("GSTIN must be alphanumeric"));
        }

        Ok(Self(value))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
