//! SHA-256 based proof-of-work hash.
//!
//! The consensus core only requires a deterministic 32-byte digest that is
//! expensive to grind. Double SHA-256 is the default implementation.

use crate::hashing::Hash;
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of data
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute double SHA-256 hash (Bitcoin-style)
#[inline]
pub fn sha256d(data: &[u8]) -> Hash {
    let first_hash = sha256(data);
    sha256(&first_hash)
}
