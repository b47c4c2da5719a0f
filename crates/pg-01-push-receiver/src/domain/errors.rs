//! # Push Errors
//!
//! Error types for the push receiver. Every failure carries an [`ErrorKind`]
//! so callers can map it to a response without matching on every variant.

use shared_crypto::CryptoError;
use thiserror::Error;

use crate::ports::outbound::HandlerError;

/// Coarse error classification reported to callers and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Computed signature differs from the supplied one
    SignatureMismatch,
    /// Base64, key, IV or cipher setup failure, or a non-UTF-8 account id
    DecodeError,
    /// PKCS7 padding did not validate
    PaddingError,
    /// Decrypted frame shorter than its fixed header
    FrameTooShort,
    /// Declared payload length disagrees with the frame
    LengthMismatch,
    /// XML/JSON marshal or unmarshal failure
    SerializationError,
    /// The business handler reported an error
    HandlerError,
}

impl ErrorKind {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SignatureMismatch => "signature_mismatch",
            ErrorKind::DecodeError => "decode_error",
            ErrorKind::PaddingError => "padding_error",
            ErrorKind::FrameTooShort => "frame_too_short",
            ErrorKind::LengthMismatch => "length_mismatch",
            ErrorKind::SerializationError => "serialization_error",
            ErrorKind::HandlerError => "handler_error",
        }
    }
}

/// Errors from parsing or building a plaintext frame.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer bytes than salt + length prefix
    #[error("Frame too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },

    /// Declared payload length runs past the end of the frame
    #[error("Frame length mismatch: declared {declared}, available {available}")]
    LengthMismatch { declared: usize, available: usize },

    /// Payload does not fit the 32-bit length prefix
    #[error("Payload too large for frame: {len} bytes")]
    PayloadTooLarge { len: usize },

    /// Account identifier trailer is not valid UTF-8
    #[error("Account identifier is not valid UTF-8")]
    InvalidAccountId,
}

/// Errors that can occur while handling a push callback.
#[derive(Debug, Error)]
pub enum PushError {
    /// Signature verification failed
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Decryption, decoding or padding failure
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Plaintext frame is malformed
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Envelope or business record could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Business handler failed
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

impl PushError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PushError::SignatureMismatch => ErrorKind::SignatureMismatch,
            PushError::Crypto(CryptoError::InvalidPadding) => ErrorKind::PaddingError,
            PushError::Crypto(_) => ErrorKind::DecodeError,
            PushError::Frame(FrameError::TooShort { .. }) => ErrorKind::FrameTooShort,
            PushError::Frame(FrameError::LengthMismatch { .. })
            | PushError::Frame(FrameError::PayloadTooLarge { .. }) => ErrorKind::LengthMismatch,
            PushError::Frame(FrameError::InvalidAccountId) => ErrorKind::DecodeError,
            PushError::Serialization(_) => ErrorKind::SerializationError,
            PushError::Handler(_) => ErrorKind::HandlerError,
        }
    }
}
