//! Published events (Outgoing)

use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Published when a block cites uncles this node has never seen.
///
/// The sync layer fetches the listed hashes; the block is re-processed once
/// they arrive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingUnclesEvent {
    /// Height of the block citing the uncles
    pub height: u64,
    /// Unknown uncle hashes, in citation order
    pub hashes: Vec<Hash>,
}

impl MissingUnclesEvent {
    pub fn new(height: u64, hashes: Vec<Hash>) -> Self {
        Self { height, hashes }
    }
}
