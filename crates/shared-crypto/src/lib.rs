//! # Shared Crypto - Envelope Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `padding` | PKCS7 | Block alignment for both decrypt paths |
//! | `symmetric` | AES-256-CBC / AES-128-CBC | Webhook envelopes, phone records |
//! | `hashing` | SHA-1 | Signature digest |
//! | `signatures` | sorted-parameter SHA-1 | Webhook authentication |
//! | `encoding` | Base64 | Key seeds, ciphertext fields |
//!
//! ## Security Properties
//!
//! - **IV / salt**: always drawn from `rand::thread_rng()` (ChaCha-based CSPRNG)
//! - **Signature check**: constant-time comparison via `subtle`
//! - **Padding**: every PKCS7 byte is validated, not just the last
//! - **Keys**: zeroized on drop, redacted in `Debug`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod errors;
pub mod hashing;
pub mod padding;
pub mod signatures;
pub mod symmetric;

// Re-exports
pub use encoding::{decode_base64, encode_base64};
pub use errors::CryptoError;
pub use hashing::{sha1_hash, Sha1Hasher};
pub use padding::{pad, unpad};
pub use signatures::{
    message_signature, plain_signature, sign_params, verify_message_signature,
    verify_plain_signature,
};
pub use symmetric::{open, open_detached, seal, Iv, SecretKey, SessionKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
