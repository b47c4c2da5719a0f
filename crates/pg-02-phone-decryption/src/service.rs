//! # Phone Decryption Service
//!
//! Implements [`PhoneDecryptionApi`] and the full request flow:
//! validate the request, exchange the login code through the
//! [`SessionKeyResolver`] port, then decrypt with the session key.

use push_telemetry::{metric_inc, PHONE_DECRYPTIONS};
use shared_crypto::{open_detached, SessionKey};
use tracing::{debug, warn};

use crate::domain::entities::{PhoneEncryptedData, PhoneInfo, SessionInfo};
use crate::domain::errors::PhoneError;
use crate::ports::inbound::PhoneDecryptionApi;
use crate::ports::outbound::SessionKeyResolver;

/// Phone decryption service.
pub struct PhoneDecryptionService<R: SessionKeyResolver> {
    resolver: R,
}

impl<R: SessionKeyResolver> PhoneDecryptionService<R> {
    /// Create a new service around a session resolver.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Parse a client request, resolve its session and decrypt the record.
    ///
    /// Returns the phone record together with the session it was sealed
    /// under, so callers can bind the number to the `openid`.
    pub async fn parse_phone_encrypted_data(
        &self,
        body: &[u8],
    ) -> Result<(PhoneInfo, SessionInfo), PhoneError> {
        let request = PhoneEncryptedData::from_json(body).and_then(|req| {
            req.validate()?;
            Ok(req)
        });
        let request = match request {
            Ok(req) => req,
            Err(err) => return Err(self.reject(err)),
        };

        let session = match self.resolver.resolve_session(&request.code).await {
            Ok(session) => session,
            Err(err) => return Err(self.reject(err.into())),
        };

        let info = self.decrypt_phone_number(
            &session.session_key,
            &request.encrypted_data,
            &request.iv,
        )?;
        debug!(openid = %session.openid, "Phone number decrypted");
        Ok((info, session))
    }

    fn reject(&self, err: PhoneError) -> PhoneError {
        metric_inc!(PHONE_DECRYPTIONS, &[err.kind()]);
        warn!(kind = err.kind(), error = %err, "Phone decryption failed");
        err
    }
}

impl<R: SessionKeyResolver> PhoneDecryptionApi for PhoneDecryptionService<R> {
    fn decrypt_phone_number(
        &self,
        session_key: &str,
        encrypted_data: &str,
        iv: &str,
    ) -> Result<PhoneInfo, PhoneError> {
        let result = decrypt_record(session_key, encrypted_data, iv);
        match result {
            Ok(info) => {
                metric_inc!(PHONE_DECRYPTIONS, &["ok"]);
                Ok(info)
            }
            Err(err) => Err(self.reject(err)),
        }
    }
}

fn decrypt_record(
    session_key: &str,
    encrypted_data: &str,
    iv: &str,
) -> Result<PhoneInfo, PhoneError> {
    let key = SessionKey::from_base64(session_key)?;
    let plaintext = open_detached(&key, encrypted_data, iv)?;
    serde_json::from_slice(&plaintext).map_err(|e| PhoneError::InvalidRecord(e.to_string()))
}
