//! # PKCS7 Padding
//!
//! Shared by the webhook envelope and the phone-number decrypt paths.
//!
//! `unpad` checks every padding byte, not only the last one. A forged or
//! corrupted ciphertext must fail here instead of reaching the frame parser.

use crate::CryptoError;

/// Pad `data` to a multiple of `block_size`.
///
/// Always appends at least one byte: an aligned input gains a full block.
///
/// # Errors
///
/// Returns `CryptoError::InvalidBlockSize` unless `1 <= block_size <= 255`.
pub fn pad(data: &[u8], block_size: usize) -> Result<Vec<u8>, CryptoError> {
    if block_size == 0 || block_size > u8::MAX as usize {
        return Err(CryptoError::InvalidBlockSize(block_size));
    }

    let n = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + n);
    padded.extend_from_slice(data);
    padded.resize(data.len() + n, n as u8);
    Ok(padded)
}

/// Strip PKCS7 padding, returning the unpadded prefix.
///
/// # Errors
///
/// Returns `CryptoError::InvalidPadding` for empty input, a declared length of
/// zero or beyond the buffer, or any trailing byte that disagrees.
pub fn unpad(data: &[u8]) -> Result<&[u8], CryptoError> {
    let n = match data.last() {
        Some(&n) => n as usize,
        None => return Err(CryptoError::InvalidPadding),
    };

    if n == 0 || n > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    let (body, padding) = data.split_at(data.len() - n);
    if padding.iter().any(|&b| b as usize != n) {
        return Err(CryptoError::InvalidPadding);
    }

    Ok(body)
}
