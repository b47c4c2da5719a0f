//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Base64 input could not be decoded
    #[error("Base64 decode failed for {field}: {reason}")]
    InvalidBase64 {
        /// Which input field was malformed
        field: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Session key is neither an AES-128 nor an AES-256 key
    #[error("Unsupported session key length: {actual} bytes (expected 16 or 32)")]
    UnsupportedKeyLength {
        /// Actual key length in bytes
        actual: usize,
    },

    /// Invalid IV length
    #[error("Invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength {
        /// Expected IV length in bytes
        expected: usize,
        /// Actual IV length in bytes
        actual: usize,
    },

    /// Ciphertext is shorter than a single block
    #[error("Ciphertext too short: {len} bytes, need at least {min}")]
    CiphertextTooShort {
        /// Ciphertext length in bytes
        len: usize,
        /// Minimum acceptable length in bytes
        min: usize,
    },

    /// Ciphertext is not a whole number of blocks
    #[error("Ciphertext length {len} is not a multiple of the block size {block_size}")]
    CiphertextNotAligned {
        /// Ciphertext length in bytes
        len: usize,
        /// Cipher block size in bytes
        block_size: usize,
    },

    /// PKCS7 padding did not validate
    #[error("Invalid PKCS7 padding")]
    InvalidPadding,

    /// Block size outside the PKCS7 range
    #[error("Invalid block size: {0} (must be 1..=255)")]
    InvalidBlockSize(usize),

    /// Cipher setup or block operation failed
    #[error("Cipher failure: {0}")]
    CipherFailure(String),
}
