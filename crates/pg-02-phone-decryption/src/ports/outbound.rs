//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::SessionInfo;
use thiserror::Error;

/// Error from a session-key exchange.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Platform answered with a non-zero error code
    #[error("Platform error {code}: {message}")]
    Platform { code: i64, message: String },

    /// Platform could not be reached
    #[error("Session service unavailable: {0}")]
    Unavailable(String),
}

/// Exchanges a one-time login code for a session.
///
/// Implementations perform network I/O; the decryption itself does not.
#[async_trait::async_trait]
pub trait SessionKeyResolver: Send + Sync {
    /// Resolve `code` to a session.
    ///
    /// # Errors
    /// * `SessionError::Platform` - the platform refused the code
    /// * `SessionError::Unavailable` - transport failure
    async fn resolve_session(&self, code: &str) -> Result<SessionInfo, SessionError>;
}
