//! # Frame Codec
//!
//! Plaintext carried inside an envelope (big-endian):
//!
//! ```text
//! | 0..16 salt | 16..20 payload length L | 20..20+L payload | rest: account id |
//! ```
//!
//! The salt only breaks up plaintext patterns; it is checked for presence
//! and otherwise ignored. Parsing never truncates: a frame that does not
//! hold what it declares is rejected.

use rand::RngCore;

use super::entities::DecryptedFrame;
use super::errors::FrameError;

/// Random salt length.
pub const SALT_LEN: usize = 16;

/// Payload length prefix size.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Smallest valid frame: salt plus length prefix.
pub const FRAME_HEADER_LEN: usize = SALT_LEN + LENGTH_PREFIX_LEN;

/// Parse a decrypted plaintext into its parts.
///
/// # Errors
///
/// `TooShort` below 20 bytes, `LengthMismatch` when the declared payload
/// runs past the end, `InvalidAccountId` for a non-UTF-8 trailer.
pub fn parse_frame(plaintext: &[u8]) -> Result<DecryptedFrame, FrameError> {
    if plaintext.len() < FRAME_HEADER_LEN {
        return Err(FrameError::TooShort {
            len: plaintext.len(),
            min: FRAME_HEADER_LEN,
        });
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&plaintext[..SALT_LEN]);

    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    prefix.copy_from_slice(&plaintext[SALT_LEN..FRAME_HEADER_LEN]);
    let declared = u32::from_be_bytes(prefix) as usize;

    let rest = &plaintext[FRAME_HEADER_LEN..];
    if declared > rest.len() {
        return Err(FrameError::LengthMismatch {
            declared,
            available: rest.len(),
        });
    }

    let (payload, account) = rest.split_at(declared);
    let account_id = std::str::from_utf8(account)
        .map_err(|_| FrameError::InvalidAccountId)?
        .to_string();

    Ok(DecryptedFrame {
        salt,
        payload: payload.to_vec(),
        account_id,
    })
}

/// Build a frame with a fresh random salt.
///
/// # Errors
///
/// `PayloadTooLarge` if the payload length does not fit in a `u32`.
pub fn build_frame(payload: &[u8], account_id: &str) -> Result<Vec<u8>, FrameError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    build_frame_with_salt(salt, payload, account_id)
}

/// Build a frame around a caller-chosen salt.
pub fn build_frame_with_salt(
    salt: [u8; SALT_LEN],
    payload: &[u8],
    account_id: &str,
) -> Result<Vec<u8>, FrameError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| FrameError::PayloadTooLarge { len: payload.len() })?;

    let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + payload.len() + account_id.len());
    frame.extend_from_slice(&salt);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    frame.extend_from_slice(account_id.as_bytes());
    Ok(frame)
}
