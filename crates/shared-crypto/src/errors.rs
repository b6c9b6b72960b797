//! Crypto error types.

use thiserror::Error;

/// A byte slice was used as a hash but is not 32 bytes long.
///
/// This is a caller contract violation, never a validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Hash length {actual} but should be 32")]
pub struct HashLengthError {
    /// Length of the offending slice
    pub actual: usize,
}
