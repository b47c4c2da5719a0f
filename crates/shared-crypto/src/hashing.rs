//! # SHA-1 Hashing
//!
//! The platform's signature scheme is SHA-1 over concatenated parameters.
//! Nothing here is a MAC; see [`crate::signatures`] for how it is keyed.

use sha1::{Digest, Sha1};

/// SHA-1 hash output (160-bit).
pub type Hash = [u8; 20];

/// Stateful SHA-1 hasher.
pub struct Sha1Hasher {
    inner: Sha1,
}

impl Sha1Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self { inner: Sha1::new() }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

impl Default for Sha1Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with SHA-1 (one-shot).
pub fn sha1_hash(data: &[u8]) -> Hash {
    Sha1::digest(data).into()
}

/// Hash multiple inputs as if concatenated.
pub fn sha1_hash_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha1Hasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}
