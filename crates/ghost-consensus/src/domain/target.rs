//! Proof-of-work target codec
//!
//! A difficulty is the probability that one uniformly random hash is
//! acceptable. The target is the inclusive upper bound that realises that
//! probability over `length`-byte big-endian values:
//! `target = floor(difficulty * 256^length) - 1`.
//!
//! Every step of the expansion (scaling by 256, subtracting the integer
//! part) is exact in IEEE-754 double precision, so a given `f64` difficulty
//! yields the same bytes on every conforming platform.

use super::{ConsensusError, ConsensusResult};
use tracing::warn;

/// Default target length in bytes.
pub const DEFAULT_TARGET_LENGTH: usize = 32;

/// Smallest difficulty representable by a `length`-byte target.
pub fn min_difficulty(length: usize) -> f64 {
    256f64.powi(-(length as i32))
}

/// Derive the `length`-byte big-endian target for `difficulty`.
///
/// Difficulties above 1 are clamped to 1 and difficulties below
/// `256^-length` (or NaN) are clamped to `256^-length`, with a warning.
pub fn derive_target(difficulty: f64, length: usize) -> Vec<u8> {
    let min = min_difficulty(length);
    let mut p = difficulty;
    if p > 1.0 {
        warn!("Difficulty({:e}) is too low, anything is possible", p);
        p = 1.0;
    }
    if !(p >= min) {
        warn!("Difficulty({:e}) is too high, clamping to {:e}", p, min);
        p = min;
    }

    // 256^length - 1
    if p >= 1.0 {
        return vec![0xFF; length];
    }

    let mut target = vec![0u8; length];
    let mut carry = p;
    for byte in target.iter_mut() {
        carry *= 256.0;
        let digit = carry.floor();
        *byte = digit as u8;
        carry -= digit;
    }

    if target.iter().any(|b| *b != 0) {
        for byte in target.iter_mut().rev() {
            let (value, borrow) = byte.overflowing_sub(1);
            *byte = value;
            if !borrow {
                break;
            }
        }
    }
    target
}

/// True iff `hash <= target` as big-endian unsigned integers.
///
/// # Errors
/// `LengthMismatch` if the two slices differ in length; that is a caller
/// bug, not a validation outcome.
pub fn is_acceptable(hash: &[u8], target: &[u8]) -> ConsensusResult<bool> {
    if hash.len() != target.len() {
        return Err(ConsensusError::LengthMismatch {
            hash: hash.len(),
            target: target.len(),
        });
    }
    Ok(hash <= target)
}
