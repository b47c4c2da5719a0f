//! # Push Receiver Service
//!
//! Application service implementing [`PushReceiverApi`].
//!
//! ## Flow
//!
//! ```text
//! plain:  verify(token, timestamp, nonce) -> parse header -> handler -> bytes
//! secure: parse envelope -> verify(.., Encrypt) -> open -> parse frame
//!         -> parse header -> handler -> frame -> seal -> sign -> envelope
//! ```
//!
//! Every failure is logged and counted here, at the boundary, so the domain
//! layer stays free of side effects.

use std::time::{SystemTime, UNIX_EPOCH};

use push_telemetry::{
    log_push_event, metric_inc, DECRYPT_FAILURES, ENVELOPES_OPENED, ENVELOPES_SEALED,
    HANDLER_FAILURES, PUSH_MESSAGES, SIGNATURE_FAILURES,
};
use rand::Rng;
use shared_crypto::{message_signature, open, seal, verify_message_signature, verify_plain_signature};
use tracing::{debug, error, warn};

use crate::adapters::wire::WireCodec;
use crate::domain::config::ReceiverConfig;
use crate::domain::entities::{
    DecryptedFrame, InboundAuthParams, PushMode, SecureEnvelope, SUCCESS_RESPONSE,
};
use crate::domain::errors::{ErrorKind, PushError};
use crate::domain::frame::{build_frame, parse_frame};
use crate::ports::inbound::PushReceiverApi;
use crate::ports::outbound::PushMessageHandler;

/// Push receiver service.
///
/// Holds immutable credentials and the injected handler; safe to share
/// across threads. See [`PushReceiverApi`] for the replay caveat.
pub struct PushReceiverService<H: PushMessageHandler> {
    config: ReceiverConfig,
    codec: WireCodec,
    handler: H,
}

impl<H: PushMessageHandler> PushReceiverService<H> {
    /// Create a new service.
    pub fn new(config: ReceiverConfig, handler: H) -> Self {
        let codec = WireCodec::new(config.wire_format);
        Self {
            config,
            codec,
            handler,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Wire codec matching the configured format.
    pub fn codec(&self) -> &WireCodec {
        &self.codec
    }

    /// Collect parameters through `fetch` and handle the push.
    pub fn handle_push_with<F>(&self, fetch: F, body: &[u8]) -> Result<Vec<u8>, PushError>
    where
        F: Fn(&str) -> String,
    {
        self.handle_push(&InboundAuthParams::from_fetcher(fetch), body)
    }

    fn handle_plain(
        &self,
        params: &InboundAuthParams,
        body: &[u8],
    ) -> Result<Vec<u8>, PushError> {
        let credentials = &self.config.credentials;
        if !verify_plain_signature(
            credentials.token(),
            &params.timestamp,
            &params.nonce,
            &params.signature,
        ) {
            return Err(PushError::SignatureMismatch);
        }

        if body.is_empty() {
            return Ok(SUCCESS_RESPONSE.to_vec());
        }

        let info = self.codec.decode_base_info(body)?;
        let reply = self.handler.handle("", &info, body)?;
        debug!(
            mode = PushMode::Plain.as_str(),
            msg_type = %info.msg_type,
            payload_len = body.len(),
            "Plain push handled"
        );

        if reply.is_empty() {
            Ok(SUCCESS_RESPONSE.to_vec())
        } else {
            Ok(reply)
        }
    }

    fn handle_secure(
        &self,
        params: &InboundAuthParams,
        body: &[u8],
    ) -> Result<Vec<u8>, PushError> {
        let envelope = self.codec.decode_encrypted_body(body)?;

        if !verify_message_signature(
            self.config.credentials.token(),
            &params.timestamp,
            &params.nonce,
            &envelope.encrypt,
            &params.msg_signature,
        ) {
            return Err(PushError::SignatureMismatch);
        }

        let frame = self.decrypt_message(&envelope.encrypt)?;
        let account_id = if frame.account_id.is_empty() {
            self.config.credentials.account_id()
        } else {
            frame.account_id.as_str()
        };

        let info = self.codec.decode_base_info(&frame.payload)?;
        let mut reply = self.handler.handle(account_id, &info, &frame.payload)?;
        if reply.is_empty() {
            reply = SUCCESS_RESPONSE.to_vec();
        }

        let sealed = self.encrypt_response(account_id, &reply)?;
        log_push_event!(
            debug,
            PushMode::Secure.as_str(),
            "Secure push handled",
            account_id = %account_id,
            payload_len = frame.payload_len()
        );
        self.codec.encode_envelope(&sealed)
    }

    fn record_failure(&self, mode: PushMode, err: &PushError) {
        let kind = err.kind();
        metric_inc!(PUSH_MESSAGES, &[mode.as_str(), kind.as_str()]);

        match kind {
            ErrorKind::SignatureMismatch => {
                metric_inc!(SIGNATURE_FAILURES);
                warn!(mode = mode.as_str(), "Push rejected: signature mismatch");
            }
            ErrorKind::HandlerError => {
                metric_inc!(HANDLER_FAILURES);
                error!(mode = mode.as_str(), error = %err, "Push handler failed");
            }
            ErrorKind::SerializationError => {
                warn!(mode = mode.as_str(), error = %err, "Push rejected: malformed body");
            }
            _ => {
                metric_inc!(DECRYPT_FAILURES, &[kind.as_str()]);
                warn!(
                    mode = mode.as_str(),
                    kind = kind.as_str(),
                    error = %err,
                    "Push rejected: envelope did not open"
                );
            }
        }
    }
}

impl<H: PushMessageHandler> PushReceiverApi for PushReceiverService<H> {
    fn handle_push(&self, params: &InboundAuthParams, body: &[u8]) -> Result<Vec<u8>, PushError> {
        let mode = params.mode(body);
        let result = match mode {
            PushMode::Plain => self.handle_plain(params, body),
            PushMode::Secure => self.handle_secure(params, body),
        };

        match &result {
            Ok(_) => metric_inc!(PUSH_MESSAGES, &[mode.as_str(), "ok"]),
            Err(err) => self.record_failure(mode, err),
        }
        result
    }

    fn decrypt_message(&self, encrypt: &str) -> Result<DecryptedFrame, PushError> {
        let plaintext = open(self.config.credentials.key(), encrypt)?;
        let frame = parse_frame(&plaintext)?;
        metric_inc!(ENVELOPES_OPENED);
        Ok(frame)
    }

    fn encrypt_response(
        &self,
        account_id: &str,
        payload: &[u8],
    ) -> Result<SecureEnvelope, PushError> {
        let frame = build_frame(payload, account_id)?;
        let encrypt = seal(self.config.credentials.key(), &frame)?;

        let timestamp = unix_now();
        let nonce = generate_nonce();
        let msg_signature = message_signature(
            self.config.credentials.token(),
            &timestamp.to_string(),
            &nonce,
            &encrypt,
        );

        metric_inc!(ENVELOPES_SEALED);
        Ok(SecureEnvelope {
            encrypt,
            msg_signature,
            timestamp,
            nonce,
        })
    }
}

/// Random 9-digit reply nonce.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .gen_range(100_000_000u32..1_000_000_000)
        .to_string()
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
