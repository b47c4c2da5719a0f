//! # Domain Entities
//!
//! The client-submitted phone request, the session it resolves to, and the
//! decrypted phone record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::PhoneError;

/// Body a client posts after the user grants phone access.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneEncryptedData {
    /// base64 ciphertext
    pub encrypted_data: String,
    /// base64 16-byte IV
    pub iv: String,
    /// One-time login code, exchanged for a session key
    pub code: String,
}

impl PhoneEncryptedData {
    /// Parse a JSON request body.
    pub fn from_json(body: &[u8]) -> Result<Self, PhoneError> {
        serde_json::from_slice(body).map_err(|e| PhoneError::InvalidRequest(e.to_string()))
    }

    /// All three fields are required.
    pub fn validate(&self) -> Result<(), PhoneError> {
        if self.code.is_empty() {
            return Err(PhoneError::MissingField("code"));
        }
        if self.encrypted_data.is_empty() {
            return Err(PhoneError::MissingField("encryptedData"));
        }
        if self.iv.is_empty() {
            return Err(PhoneError::MissingField("iv"));
        }
        Ok(())
    }
}

/// Platform stamp embedded in the record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub appid: String,
    pub timestamp: i64,
}

/// Decrypted phone record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneInfo {
    /// Number with country prefix, e.g. `+86 13800138000`
    #[serde(default)]
    pub phone_number: String,
    /// Number without country prefix
    #[serde(default)]
    pub pure_phone_number: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<Watermark>,
}

/// Result of exchanging a login code.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub openid: String,
    /// base64 session key
    #[serde(default)]
    pub session_key: String,
}

// Keep the session key out of logs
impl fmt::Debug for SessionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionInfo")
            .field("openid", &self.openid)
            .field("session_key", &"[REDACTED]")
            .finish()
    }
}
