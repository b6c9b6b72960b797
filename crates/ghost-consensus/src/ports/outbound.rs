//! Driven ports (Outbound dependencies)

use crate::domain::{AcceptanceResult, BlockRecord, BlockStatus, UncleCandidate};
use crate::events::MissingUnclesEvent;
use async_trait::async_trait;
use shared_types::{Block, BlockHeader, Hash};

/// Read access to persisted block state
///
/// Writes belong to the collaborator that owns persistence.
#[async_trait]
pub trait BlockDatabase: Send + Sync {
    /// Current status of `hash`; unknown hashes are `BlockStatus::Nothing`
    async fn get_block_status(&self, hash: &Hash) -> Result<BlockStatus, String>;

    /// Persisted record of `hash`, if any
    async fn get_block_record(&self, hash: &Hash) -> Result<Option<BlockRecord>, String>;
}

/// The hard-to-compute proof-of-work hash
///
/// Input is the 40-byte PoW pre-image (see `domain::pow_input`).
#[async_trait]
pub trait PowHasher: Send + Sync {
    async fn pow_hash(&self, input: Vec<u8>) -> Result<Hash, String>;
}

/// Everything the state-transition engine needs to apply a block.
#[derive(Clone, Debug)]
pub struct BlockApplication<'a> {
    pub block: &'a Block,
    pub hash: &'a Hash,
    pub header: &'a BlockHeader,
    pub parent_record: &'a BlockRecord,
    /// Per-block reward
    pub reward: u64,
    /// Share the reward with credited uncles
    pub split_reward_among_uncles: bool,
    pub uncles: &'a [UncleCandidate],
}

/// Outer state-transition engine
#[async_trait]
pub trait StateTransition: Send + Sync {
    /// Apply balances and state for a block.
    ///
    /// Sets `result.status` to `BlockStatus::Block` on success and leaves it
    /// unchanged (or sets `InvalidBlock`) otherwise.
    async fn apply_block(
        &self,
        application: BlockApplication<'_>,
        result: &mut AcceptanceResult,
    ) -> Result<(), String>;
}

/// Fire-and-forget signal to the sync layer that uncles must be fetched
#[async_trait]
pub trait MissingUncleSink: Send + Sync {
    async fn notify_missing_uncles(&self, event: MissingUnclesEvent) -> Result<(), String>;
}
