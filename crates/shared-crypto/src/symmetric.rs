//! # Symmetric Encryption
//!
//! AES-CBC with PKCS7 padding, in the two shapes the platform uses:
//!
//! - **Embedded IV** ([`seal`] / [`open`]): base64 of `IV || ciphertext`,
//!   AES-256 only. Used for webhook envelopes.
//! - **Detached IV** ([`open_detached`]): IV and ciphertext arrive as separate
//!   base64 fields. Used for phone-number records, keyed by a session key.
//!
//! CBC gives no integrity. Callers authenticate the ciphertext (signature
//! check) before decrypting it.

use aes::{Aes128, Aes256};
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use std::fmt;
use zeroize::Zeroize;

use crate::encoding::{decode_base64, encode_base64};
use crate::padding::{pad, unpad};
use crate::CryptoError;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// Envelope key length (AES-256).
pub const KEY_LEN: usize = 32;

/// Length of the configured key seed (base64 without its final `=`).
pub const KEY_SEED_LEN: usize = 43;

/// Envelope secret key (256-bit).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Derive the key from the 43-character seed: `base64(seed + "=")`.
    ///
    /// # Errors
    ///
    /// `InvalidBase64` for a malformed seed, `InvalidKeyLength` when the seed
    /// decodes to anything other than 32 bytes.
    pub fn from_key_seed(seed: &str) -> Result<Self, CryptoError> {
        let mut raw = decode_base64("key seed", &format!("{seed}="))?;
        let key = Self::from_slice(&raw);
        raw.zeroize();
        key
    }

    /// Generate random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Session key for detached-IV payloads: AES-128 or AES-256.
#[derive(Clone)]
pub enum SessionKey {
    /// 16-byte key, what the platform issues for user sessions
    Aes128([u8; 16]),
    /// 32-byte key
    Aes256([u8; 32]),
}

impl SessionKey {
    /// Create from raw bytes (16 or 32 long).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.len() {
            16 => {
                let mut k = [0u8; 16];
                k.copy_from_slice(bytes);
                Ok(Self::Aes128(k))
            }
            32 => {
                let mut k = [0u8; 32];
                k.copy_from_slice(bytes);
                Ok(Self::Aes256(k))
            }
            actual => Err(CryptoError::UnsupportedKeyLength { actual }),
        }
    }

    /// Decode a base64 session key.
    pub fn from_base64(encoded: &str) -> Result<Self, CryptoError> {
        let mut raw = decode_base64("session key", encoded)?;
        let key = Self::from_slice(&raw);
        raw.zeroize();
        key
    }

    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Aes128(k) => k,
            Self::Aes256(k) => k,
        }
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        match self {
            Self::Aes128(k) => k.zeroize(),
            Self::Aes256(k) => k.zeroize(),
        }
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aes128(_) => f.write_str("SessionKey::Aes128([REDACTED])"),
            Self::Aes256(_) => f.write_str("SessionKey::Aes256([REDACTED])"),
        }
    }
}

/// CBC initialization vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iv([u8; IV_LEN]);

impl Iv {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; IV_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, which must be exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; IV_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidIvLength {
                    expected: IV_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Generate random IV.
    pub fn generate() -> Self {
        let mut bytes = [0u8; IV_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; IV_LEN] {
        &self.0
    }
}

/// Pad and encrypt `plaintext` with AES-256-CBC.
pub fn encrypt(key: &SecretKey, iv: &Iv, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    cbc_encrypt(key.as_bytes(), iv, plaintext)
}

/// Decrypt AES-256-CBC `ciphertext` and strip its padding.
pub fn decrypt(key: &SecretKey, iv: &Iv, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    cbc_decrypt(key.as_bytes(), iv, ciphertext)
}

/// Encrypt with a fresh random IV and return `base64(IV || ciphertext)`.
///
/// # Errors
///
/// Returns `CryptoError::CipherFailure` if the cipher cannot be set up.
pub fn seal(key: &SecretKey, plaintext: &[u8]) -> Result<String, CryptoError> {
    let iv = Iv::generate();
    let ciphertext = encrypt(key, &iv, plaintext)?;

    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(iv.as_bytes());
    out.extend_from_slice(&ciphertext);
    Ok(encode_base64(&out))
}

/// Decode `base64(IV || ciphertext)`, decrypt and unpad.
///
/// # Errors
///
/// `InvalidBase64`, `CiphertextTooShort` (no room for IV plus one block),
/// `CiphertextNotAligned`, or `InvalidPadding`.
pub fn open(key: &SecretKey, encoded: &str) -> Result<Vec<u8>, CryptoError> {
    let raw = decode_base64("encrypt", encoded)?;
    if raw.len() < IV_LEN + BLOCK_SIZE {
        return Err(CryptoError::CiphertextTooShort {
            len: raw.len(),
            min: IV_LEN + BLOCK_SIZE,
        });
    }

    let (iv, ciphertext) = raw.split_at(IV_LEN);
    decrypt(key, &Iv::from_slice(iv)?, ciphertext)
}

/// Decrypt a detached-IV payload: both fields are base64.
///
/// # Errors
///
/// `InvalidBase64` on either field, `InvalidIvLength`, `CiphertextTooShort`,
/// `CiphertextNotAligned`, or `InvalidPadding`.
pub fn open_detached(
    key: &SessionKey,
    encrypted_data: &str,
    iv: &str,
) -> Result<Vec<u8>, CryptoError> {
    let ciphertext = decode_base64("encryptedData", encrypted_data)?;
    let iv = Iv::from_slice(&decode_base64("iv", iv)?)?;
    cbc_decrypt(key.as_slice(), &iv, &ciphertext)
}

fn check_blocks(ciphertext: &[u8]) -> Result<(), CryptoError> {
    if ciphertext.len() < BLOCK_SIZE {
        return Err(CryptoError::CiphertextTooShort {
            len: ciphertext.len(),
            min: BLOCK_SIZE,
        });
    }
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::CiphertextNotAligned {
            len: ciphertext.len(),
            block_size: BLOCK_SIZE,
        });
    }
    Ok(())
}

fn cipher_failure(e: impl fmt::Display) -> CryptoError {
    CryptoError::CipherFailure(e.to_string())
}

fn cbc_encrypt(key: &[u8], iv: &Iv, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let padded = pad(plaintext, BLOCK_SIZE)?;
    let iv = iv.as_bytes().as_slice();

    let ciphertext = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(cipher_failure)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        32 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(cipher_failure)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        actual => {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual,
            })
        }
    };

    Ok(ciphertext)
}

fn cbc_decrypt(key: &[u8], iv: &Iv, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_blocks(ciphertext)?;
    let iv = iv.as_bytes().as_slice();

    let mut plaintext = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(cipher_failure)?
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(cipher_failure)?
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
        actual => {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual,
            })
        }
    }
    .map_err(cipher_failure)?;

    let unpadded_len = unpad(&plaintext)?.len();
    plaintext.truncate(unpadded_len);
    Ok(plaintext)
}
