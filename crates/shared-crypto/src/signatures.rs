//! # Parameter Signatures
//!
//! `hex(sha1(sort(params).concat()))`, the platform's webhook signature.
//!
//! Parameters are sorted as byte strings and joined with no separator. The
//! exact parameter set and ordering must match the platform bit for bit:
//!
//! - plain callbacks: `{token, timestamp, nonce}`
//! - encrypted callbacks and replies: `{token, timestamp, nonce, encrypt}`
//!
//! Verification compares in constant time.

use subtle::ConstantTimeEq;

use crate::hashing::Sha1Hasher;

/// Length of a hex-encoded signature.
pub const SIGNATURE_HEX_LEN: usize = 40;

/// Compute the lowercase hex signature over `params`.
pub fn sign_params(params: &[&str]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_unstable();

    let mut hasher = Sha1Hasher::new();
    for param in sorted {
        hasher.update(param.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Check `signature` against the signature of `params`.
pub fn verify_params(params: &[&str], signature: &str) -> bool {
    let expected = sign_params(params);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// Signature for a plain-mode callback.
pub fn plain_signature(token: &str, timestamp: &str, nonce: &str) -> String {
    sign_params(&[token, timestamp, nonce])
}

/// Signature for an encrypted callback or reply.
pub fn message_signature(token: &str, timestamp: &str, nonce: &str, encrypt: &str) -> String {
    sign_params(&[token, timestamp, nonce, encrypt])
}

/// Verify a plain-mode callback signature.
pub fn verify_plain_signature(token: &str, timestamp: &str, nonce: &str, signature: &str) -> bool {
    verify_params(&[token, timestamp, nonce], signature)
}

/// Verify an encrypted-mode message signature.
pub fn verify_message_signature(
    token: &str,
    timestamp: &str,
    nonce: &str,
    encrypt: &str,
    msg_signature: &str,
) -> bool {
    verify_params(&[token, timestamp, nonce, encrypt], msg_signature)
}
