//! Proof-of-work input framing and nonce search
//!
//! The PoW hash commits to the header's pre-hash (every field except the
//! nonce) followed by the nonce as 8 little-endian bytes. Miners therefore
//! hash the header once and only vary the 8-byte suffix.

use super::{is_acceptable, ConsensusResult};
use shared_types::Hash;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Length of a PoW input: 32-byte pre-hash plus 8-byte nonce.
pub const POW_INPUT_LENGTH: usize = 40;

/// Bytes fed to the PoW hasher for `nonce`.
pub fn pow_input(pre_hash: &Hash, nonce: u64) -> [u8; POW_INPUT_LENGTH] {
    let mut input = [0u8; POW_INPUT_LENGTH];
    input[..32].copy_from_slice(pre_hash);
    input[32..].copy_from_slice(&nonce.to_le_bytes());
    input
}

/// How a nonce search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonceSearchOutcome {
    /// `nonce` produces an acceptable hash
    Found(u64),
    /// Caller raised the stop flag; resume from `next_nonce`
    Stopped { next_nonce: u64 },
    /// No nonce in the range is acceptable
    Exhausted { next_nonce: u64 },
}

/// Scan `nonces` for a PoW hash at or below `target`.
///
/// `stop` is polled before every attempt, so a search can be abandoned as
/// soon as a better parent arrives. `hash_fn` is the synchronous form of the
/// PoW hash; its output must be as long as `target`.
///
/// # Errors
/// `LengthMismatch` if `hash_fn` output and `target` differ in length.
pub fn search_nonce<F>(
    pre_hash: &Hash,
    target: &[u8],
    nonces: Range<u64>,
    stop: &AtomicBool,
    mut hash_fn: F,
) -> ConsensusResult<NonceSearchOutcome>
where
    F: FnMut(&[u8]) -> Hash,
{
    debug!(
        "Starting nonce search: start={}, end={}",
        nonces.start, nonces.end
    );

    let end = nonces.end;
    for nonce in nonces {
        if stop.load(Ordering::Relaxed) {
            debug!("Nonce search stopped at {}", nonce);
            return Ok(NonceSearchOutcome::Stopped { next_nonce: nonce });
        }

        let hash = hash_fn(&pow_input(pre_hash, nonce));
        if is_acceptable(&hash, target)? {
            info!("Nonce search successful: nonce={}", nonce);
            return Ok(NonceSearchOutcome::Found(nonce));
        }
    }

    debug!("Nonce search exhausted range ending at {}", end);
    Ok(NonceSearchOutcome::Exhausted { next_nonce: end })
}
