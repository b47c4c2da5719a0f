//! # Domain Entities
//!
//! Request parameters, wire envelopes and the decrypted frame.

use serde::{Deserialize, Serialize};

/// Query parameter carrying the plain-mode signature.
pub const PARAM_SIGNATURE: &str = "signature";
/// Query parameter carrying the secure-mode signature.
pub const PARAM_MSG_SIGNATURE: &str = "msg_signature";
/// Query parameter carrying the timestamp.
pub const PARAM_TIMESTAMP: &str = "timestamp";
/// Query parameter carrying the nonce.
pub const PARAM_NONCE: &str = "nonce";
/// Query parameter carrying the encryption type.
pub const PARAM_ENCRYPT_TYPE: &str = "encrypt_type";

/// `encrypt_type` value that selects the secure path.
pub const ENCRYPT_TYPE_AES: &str = "aes";

/// Reply body used when the handler has nothing to say.
pub const SUCCESS_RESPONSE: &[u8] = b"success";

/// How a callback is processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushMode {
    /// Signature over `{token, timestamp, nonce}`, body in the clear
    Plain,
    /// Signature includes the ciphertext, body is an encrypted envelope
    Secure,
}

impl PushMode {
    /// Label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            PushMode::Plain => "plain",
            PushMode::Secure => "secure",
        }
    }
}

/// Authentication parameters supplied by the transport. Untrusted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InboundAuthParams {
    pub signature: String,
    pub msg_signature: String,
    pub timestamp: String,
    pub nonce: String,
    pub encrypt_type: String,
}

impl InboundAuthParams {
    /// Collect parameters through a lookup such as a query-string getter.
    /// Missing parameters should come back as empty strings.
    pub fn from_fetcher<F>(fetch: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        Self {
            signature: fetch(PARAM_SIGNATURE),
            msg_signature: fetch(PARAM_MSG_SIGNATURE),
            timestamp: fetch(PARAM_TIMESTAMP),
            nonce: fetch(PARAM_NONCE),
            encrypt_type: fetch(PARAM_ENCRYPT_TYPE),
        }
    }

    /// Secure when the transport asks for AES and there is a body to decrypt.
    pub fn mode(&self, body: &[u8]) -> PushMode {
        if self.encrypt_type == ENCRYPT_TYPE_AES && !body.is_empty() {
            PushMode::Secure
        } else {
            PushMode::Plain
        }
    }
}

/// Common header fields of every pushed business message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushBaseInfo {
    #[serde(rename = "ToUserName")]
    pub to_user_name: String,
    #[serde(rename = "FromUserName")]
    pub from_user_name: String,
    #[serde(rename = "CreateTime")]
    pub create_time: i64,
    #[serde(rename = "MsgType")]
    pub msg_type: String,
    #[serde(rename = "Event")]
    pub event: String,
}

/// Inbound secure body; only `Encrypt` is read, other fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EncryptedBody {
    #[serde(rename = "Encrypt")]
    pub encrypt: String,
}

/// Signed, encrypted reply envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureEnvelope {
    /// base64(IV || AES-256-CBC(frame))
    #[serde(rename = "Encrypt")]
    pub encrypt: String,
    /// 40-char lowercase hex SHA-1 signature
    #[serde(rename = "MsgSignature")]
    pub msg_signature: String,
    /// Seconds since the Unix epoch
    #[serde(rename = "TimeStamp")]
    pub timestamp: i64,
    #[serde(rename = "Nonce")]
    pub nonce: String,
}

/// Plaintext recovered from an envelope.
///
/// Invariant: `20 + payload.len()` never exceeds the plaintext it came from;
/// any tail beyond the payload is `account_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecryptedFrame {
    pub salt: [u8; 16],
    pub payload: Vec<u8>,
    pub account_id: String,
}

impl DecryptedFrame {
    /// Declared and actual payload length.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}
