//! Persisted block records and per-call acceptance results

use super::BlockStatus;
use serde::{Deserialize, Serialize};
use shared_types::{ChainHeader, GenesisHeader};

/// Derived state persisted once per accepted header.
///
/// Difficulty and EMA fields are fixed when the header is first accepted.
/// `total_work` is raised exactly once more, when the block's uncle work is
/// folded in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub header: ChainHeader,
    /// Parent height + 1; genesis is 0
    pub height: u64,
    /// Smoothed inter-block time (ms)
    pub t_ema: f64,
    /// Smoothed work per block (expected hashes)
    pub p_ema: f64,
    /// Difficulty every child of this block must declare
    pub next_difficulty: f64,
    /// Sum of `1/difficulty` over the ancestry plus credited uncle work
    pub total_work: f64,
}

impl BlockRecord {
    /// Record for the chain root. Genesis carries no work of its own.
    pub fn genesis(header: GenesisHeader, t_ema: f64, p_ema: f64, next_difficulty: f64) -> Self {
        Self {
            header: ChainHeader::Genesis(header),
            height: 0,
            t_ema,
            p_ema,
            next_difficulty,
            total_work: 0.0,
        }
    }

    /// Check if this is the genesis record
    pub fn is_genesis(&self) -> bool {
        matches!(self.header, ChainHeader::Genesis(_))
    }

    /// Estimated network hashrate in hashes per second.
    pub fn hashrate(&self) -> f64 {
        self.p_ema * 1000.0 / self.t_ema
    }
}

/// Outcome of one `process()` call.
///
/// Owned by the call that produced it; concurrent validations of the same
/// header each work on their own result.
#[derive(Clone, Debug, PartialEq)]
pub struct AcceptanceResult {
    /// Status of the hash before this call
    pub old_status: BlockStatus,
    /// Status after this call
    pub status: BlockStatus,
    /// Draft record, present once the header has been validated
    pub record: Option<BlockRecord>,
}

impl AcceptanceResult {
    /// Start a call for a hash currently at `old_status`.
    pub fn new(old_status: BlockStatus) -> Self {
        Self {
            old_status,
            status: old_status,
            record: None,
        }
    }

    /// Resume a call for a hash whose record is already persisted.
    pub fn with_record(old_status: BlockStatus, record: BlockRecord) -> Self {
        Self {
            old_status,
            status: old_status,
            record: Some(record),
        }
    }

    /// True if this call moved the hash to a different status.
    pub fn changed(&self) -> bool {
        self.old_status != self.status
    }
}
