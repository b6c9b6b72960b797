//! # BLAKE2b-256 Hashing
//!
//! Identity hash for headers, blocks and content. Output is fixed at 32
//! bytes; the digest of no input at all is the `empty_hash()` used for
//! absent content.

use crate::errors::HashLengthError;
use blake2b_simd::{Params, State};

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// Digest length in bytes.
pub const HASH_LENGTH: usize = 32;

/// Stateful BLAKE2b-256 hasher.
pub struct Blake2bHasher {
    inner: State,
}

impl Blake2bHasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Params::new().hash_length(HASH_LENGTH).to_state(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(&self) -> Hash {
        let mut output = [0u8; HASH_LENGTH];
        output.copy_from_slice(self.inner.finalize().as_bytes());
        output
    }
}

impl Default for Blake2bHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with BLAKE2b-256 (one-shot).
pub fn blake2b_hash(data: &[u8]) -> Hash {
    Blake2bHasher::new().update(data).finalize()
}

/// Hash multiple inputs as one concatenated message.
pub fn blake2b_hash_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Blake2bHasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

/// Identity value for absent content: the digest of zero bytes.
pub fn empty_hash() -> Hash {
    Blake2bHasher::new().finalize()
}

/// Interpret a byte slice as a hash.
///
/// # Errors
/// Returns `HashLengthError` if the slice is not exactly 32 bytes.
pub fn hash_from_slice(bytes: &[u8]) -> Result<Hash, HashLengthError> {
    bytes
        .try_into()
        .map_err(|_| HashLengthError {
            actual: bytes.len(),
        })
}
