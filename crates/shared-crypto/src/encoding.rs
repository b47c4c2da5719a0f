//! Base64 helpers.
//!
//! The platform produces keys and ciphertexts whose final symbol can carry
//! non-zero trailing bits, so decoding accepts them. Encoding is canonical.

use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::CryptoError;

const PLATFORM_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode standard padded base64, naming `field` in the error.
pub fn decode_base64(field: &'static str, input: &str) -> Result<Vec<u8>, CryptoError> {
    PLATFORM_BASE64
        .decode(input.trim())
        .map_err(|e| CryptoError::InvalidBase64 {
            field,
            reason: e.to_string(),
        })
}

/// Encode as standard padded base64.
pub fn encode_base64(data: &[u8]) -> String {
    PLATFORM_BASE64.encode(data)
}
