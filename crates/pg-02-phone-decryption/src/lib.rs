//! # Phone Decryption Subsystem (PG-02)
//!
//! Decrypts the phone-number records the platform hands to clients. The
//! record is AES-CBC encrypted under the user's session key with a separate
//! IV; the session key comes from exchanging a one-time login code.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): request, session and record types
//! - **Ports Layer** (`ports/`): `PhoneDecryptionApi` in, `SessionKeyResolver` out
//! - **Service Layer** (`service.rs`): validation, session lookup, decryption
//!
//! Session keys and plaintext records are never logged.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{PhoneEncryptedData, PhoneInfo, SessionInfo, Watermark};
pub use domain::errors::PhoneError;
pub use ports::inbound::PhoneDecryptionApi;
pub use ports::outbound::{SessionError, SessionKeyResolver};
pub use service::PhoneDecryptionService;
