//! Double SHA-256 proof-of-work hasher
//!
//! Hashing runs on tokio's blocking pool so a node validating many headers
//! does not stall the event loop.

use crate::ports::PowHasher;
use async_trait::async_trait;
use shared_crypto::sha256d;
use shared_types::Hash;

/// `PowHasher` backed by `sha256d`
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256dPowHasher;

impl Sha256dPowHasher {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form, for nonce search
    pub fn hash(input: &[u8]) -> Hash {
        sha256d(input)
    }
}

#[async_trait]
impl PowHasher for Sha256dPowHasher {
    async fn pow_hash(&self, input: Vec<u8>) -> Result<Hash, String> {
        tokio::task::spawn_blocking(move || sha256d(&input))
            .await
            .map_err(|e| format!("PoW hash task failed: {}", e))
    }
}
