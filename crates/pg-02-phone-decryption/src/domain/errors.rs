//! Phone decryption errors.

use shared_crypto::CryptoError;
use thiserror::Error;

use crate::ports::outbound::SessionError;

/// Errors from phone-number decryption.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    /// Request body is not the expected JSON object
    #[error("Invalid phone request: {0}")]
    InvalidRequest(String),

    /// A required request field is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Login code could not be exchanged
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Base64, key, IV or padding failure
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Plaintext is not a phone record
    #[error("Invalid phone record: {0}")]
    InvalidRecord(String),
}

impl PhoneError {
    /// Stable label for logs and metrics. Crypto and record failures share
    /// their labels with the push receiver.
    pub fn kind(&self) -> &'static str {
        match self {
            PhoneError::InvalidRequest(_) | PhoneError::MissingField(_) => "invalid_request",
            PhoneError::Session(_) => "session_error",
            PhoneError::Crypto(CryptoError::InvalidPadding) => "padding_error",
            PhoneError::Crypto(_) => "decode_error",
            PhoneError::InvalidRecord(_) => "serialization_error",
        }
    }
}
