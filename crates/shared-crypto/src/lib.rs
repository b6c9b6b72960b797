//! # Shared Crypto - Hash Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE2b-256 | Header, block and content identity |
//! | `pow` | SHA-256d | Default proof-of-work hash |
//!
//! Both hashes produce 32-byte digests. Consensus code treats them as black
//! boxes: the identity hash names things, the proof-of-work hash is checked
//! against a difficulty target.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod pow;

// Re-exports
pub use errors::HashLengthError;
pub use hashing::{
    blake2b_hash, blake2b_hash_many, empty_hash, hash_from_slice, Blake2bHasher, Hash, HASH_LENGTH,
};
pub use pow::{sha256, sha256d};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
