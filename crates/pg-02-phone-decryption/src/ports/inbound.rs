//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::PhoneInfo;
use crate::domain::errors::PhoneError;

/// Phone decryption API.
pub trait PhoneDecryptionApi: Send + Sync {
    /// Decrypt a phone record with an external IV.
    ///
    /// All three arguments are base64. The session key may decode to 16 or
    /// 32 bytes.
    ///
    /// # Errors
    /// `PhoneError::Crypto` for any decode, length or padding failure,
    /// `PhoneError::InvalidRecord` if the plaintext is not a phone record.
    fn decrypt_phone_number(
        &self,
        session_key: &str,
        encrypted_data: &str,
        iv: &str,
    ) -> Result<PhoneInfo, PhoneError>;
}
