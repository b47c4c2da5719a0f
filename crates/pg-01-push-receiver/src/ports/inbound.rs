//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the push receiver. Implementations must be `Send + Sync`.

use crate::domain::entities::{DecryptedFrame, InboundAuthParams, SecureEnvelope};
use crate::domain::errors::PushError;

/// Push receiver API.
///
/// # Replay
///
/// No implementation tracks timestamps or nonces. A captured request replays
/// successfully; callers that care must reject stale timestamps or seen
/// nonces before calling [`PushReceiverApi::handle_push`].
pub trait PushReceiverApi: Send + Sync {
    /// Authenticate, decrypt if needed, dispatch to the handler and return
    /// the reply body.
    ///
    /// # Errors
    /// Any [`PushError`]; forged input never reaches the handler.
    fn handle_push(&self, params: &InboundAuthParams, body: &[u8]) -> Result<Vec<u8>, PushError>;

    /// Open an `Encrypt` value and parse the frame inside.
    ///
    /// Performs no signature check.
    fn decrypt_message(&self, encrypt: &str) -> Result<DecryptedFrame, PushError>;

    /// Frame, encrypt and sign a reply for `account_id`.
    fn encrypt_response(
        &self,
        account_id: &str,
        payload: &[u8],
    ) -> Result<SecureEnvelope, PushError>;
}
