//! Receiver configuration and credentials
//!
//! # Example
//!
//! ```ignore
//! use pg_01_push_receiver::domain::{Credentials, ReceiverConfig, WireFormat};
//!
//! let credentials = Credentials::new(
//!     "01234567800123456780012345678001",
//!     "0123456780012345678001234567800123456780012",
//!     "test-app-id",
//! )?;
//! let config = ReceiverConfig::new(credentials, WireFormat::Json);
//! ```

use shared_crypto::{CryptoError, SecretKey};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable holding the shared token.
pub const ENV_TOKEN: &str = "PG_TOKEN";
/// Environment variable holding the 43-character key seed.
pub const ENV_KEY_SEED: &str = "PG_ENCODING_AES_KEY";
/// Environment variable holding the local account id.
pub const ENV_ACCOUNT_ID: &str = "PG_ACCOUNT_ID";
/// Environment variable selecting `xml` or `json`.
pub const ENV_DATA_TYPE: &str = "PG_DATA_TYPE";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid data type: {0} (expected xml or json)")]
    InvalidDataType(String),

    #[error("Invalid symmetric key seed: {0}")]
    InvalidKeySeed(#[from] CryptoError),
}

/// Serialization used for envelopes and business records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WireFormat {
    /// `<xml>...</xml>` documents (platform default)
    #[default]
    Xml,
    /// JSON objects with the same field names
    Json,
}

impl FromStr for WireFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(WireFormat::Xml),
            "json" => Ok(WireFormat::Json),
            other => Err(ConfigError::InvalidDataType(other.to_string())),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Xml => f.write_str("xml"),
            WireFormat::Json => f.write_str("json"),
        }
    }
}

/// Shared secrets for one platform account. Immutable after construction.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    key: SecretKey,
    account_id: String,
}

impl Credentials {
    /// Build credentials, deriving the AES key from `key_seed`.
    ///
    /// # Errors
    ///
    /// `ConfigError::Missing` for an empty token, `ConfigError::InvalidKeySeed`
    /// when the seed does not decode to a 32-byte key.
    pub fn new(
        token: impl Into<String>,
        key_seed: &str,
        account_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::Missing("token"));
        }

        Ok(Self {
            token,
            key: SecretKey::from_key_seed(key_seed)?,
            account_id: account_id.into(),
        })
    }

    /// Shared signature token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Derived AES-256 key.
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Local account id, used when a frame carries none.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

// Custom Debug implementation to prevent secret leakage
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("key", &self.key)
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Push receiver configuration.
#[derive(Clone, Debug)]
pub struct ReceiverConfig {
    /// Account credentials
    pub credentials: Credentials,
    /// Envelope and record serialization
    pub wire_format: WireFormat,
}

impl ReceiverConfig {
    /// Create a configuration.
    pub fn new(credentials: Credentials, wire_format: WireFormat) -> Self {
        Self {
            credentials,
            wire_format,
        }
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PG_TOKEN`: shared token (required)
    /// - `PG_ENCODING_AES_KEY`: 43-character key seed (required)
    /// - `PG_ACCOUNT_ID`: local account id (default: empty)
    /// - `PG_DATA_TYPE`: `xml` or `json` (default: xml)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup using the `PG_*` names above.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN).ok_or(ConfigError::Missing(ENV_TOKEN))?;
        let key_seed = lookup(ENV_KEY_SEED).ok_or(ConfigError::Missing(ENV_KEY_SEED))?;
        let account_id = lookup(ENV_ACCOUNT_ID).unwrap_or_default();
        let wire_format = match lookup(ENV_DATA_TYPE) {
            Some(v) => v.parse()?,
            None => WireFormat::default(),
        };

        let credentials = Credentials::new(token, &key_seed, account_id)?;
        Ok(Self::new(credentials, wire_format))
    }
}
