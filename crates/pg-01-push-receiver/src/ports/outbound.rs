//! # Outbound Ports (Driven Ports / SPI)
//!
//! The business handler the receiver hands authenticated messages to.

use crate::domain::entities::PushBaseInfo;
use thiserror::Error;

/// Error reported by a business handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// The message was understood but refused
    #[error("Message rejected: {0}")]
    Rejected(String),

    /// The handler failed while processing
    #[error("Handler failed: {0}")]
    Failed(String),
}

/// Business logic invoked for every authenticated push.
///
/// Only messages that passed signature verification (and, in secure mode,
/// decryption and frame parsing) reach the handler.
pub trait PushMessageHandler: Send + Sync {
    /// Handle one message.
    ///
    /// # Arguments
    /// * `account_id` - Account from the frame trailer; empty in plain mode
    /// * `info` - Common header fields parsed from the payload
    /// * `payload` - Raw payload bytes in the configured wire format
    ///
    /// An empty return value is replaced by `success`.
    fn handle(
        &self,
        account_id: &str,
        info: &PushBaseInfo,
        payload: &[u8],
    ) -> Result<Vec<u8>, HandlerError>;
}

impl<F> PushMessageHandler for F
where
    F: Fn(&str, &PushBaseInfo, &[u8]) -> Result<Vec<u8>, HandlerError> + Send + Sync,
{
    fn handle(
        &self,
        account_id: &str,
        info: &PushBaseInfo,
        payload: &[u8],
    ) -> Result<Vec<u8>, HandlerError> {
        self(account_id, info, payload)
    }
}
