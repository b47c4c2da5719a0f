//! XML / JSON codec for envelopes and business records.
//!
//! XML documents use `xml` as the root element, matching what the platform
//! sends. Field names are identical in both formats.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::config::WireFormat;
use crate::domain::entities::{EncryptedBody, PushBaseInfo, SecureEnvelope};
use crate::domain::errors::PushError;

const XML_ROOT: &str = "xml";

/// Serializer bound to one [`WireFormat`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WireCodec {
    format: WireFormat,
}

impl WireCodec {
    /// Create a codec for `format`.
    pub fn new(format: WireFormat) -> Self {
        Self { format }
    }

    /// Read the `Encrypt` field of an inbound secure body.
    pub fn decode_encrypted_body(&self, body: &[u8]) -> Result<EncryptedBody, PushError> {
        self.decode(body)
    }

    /// Read the common header fields of a business record.
    pub fn decode_base_info(&self, payload: &[u8]) -> Result<PushBaseInfo, PushError> {
        self.decode(payload)
    }

    /// Serialize a reply envelope.
    pub fn encode_envelope(&self, envelope: &SecureEnvelope) -> Result<Vec<u8>, PushError> {
        self.encode(envelope)
    }

    /// Parse a reply envelope.
    pub fn decode_envelope(&self, body: &[u8]) -> Result<SecureEnvelope, PushError> {
        self.decode(body)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, PushError> {
        match self.format {
            WireFormat::Json => serde_json::from_slice(bytes).map_err(serialization),
            WireFormat::Xml => {
                let text = std::str::from_utf8(bytes).map_err(serialization)?;
                quick_xml::de::from_str(text).map_err(serialization)
            }
        }
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, PushError> {
        match self.format {
            WireFormat::Json => serde_json::to_vec(value).map_err(serialization),
            WireFormat::Xml => quick_xml::se::to_string_with_root(XML_ROOT, value)
                .map(String::into_bytes)
                .map_err(serialization),
        }
    }
}

fn serialization<E: std::fmt::Display>(err: E) -> PushError {
    PushError::Serialization(err.to_string())
}
