//! Driving ports (Inbound API)

use crate::domain::{AcceptanceResult, BlockRecord, BlockStatus, ConsensusResult};
use async_trait::async_trait;
use shared_types::{Block, BlockHeader, Hash};

/// One validation call for a header and, optionally, its block body.
#[derive(Clone, Debug)]
pub struct ProcessRequest {
    /// Record of the primary parent, if the caller has one
    pub previous_record: Option<BlockRecord>,
    /// Status of the primary parent
    pub previous_status: BlockStatus,
    /// Identity of the candidate header
    pub hash: Hash,
    pub header: BlockHeader,
    /// Full block, when the body is available
    pub block: Option<Block>,
    /// Call-local result; `old_status` is the hash's status before this call
    pub result: AcceptanceResult,
}

/// Primary consensus API
#[async_trait]
pub trait GhostConsensusApi: Send + Sync {
    /// Validate a header and, when the body and parent allow it, finalize the block.
    ///
    /// Returns the updated result. Rejected, invalid and deferred outcomes are
    /// recorded on the result; `Err` is reserved for collaborator failures.
    async fn process(&self, request: ProcessRequest) -> ConsensusResult<AcceptanceResult>;

    /// Check the proof of work of `pre_hash` and `nonce` at `difficulty`.
    async fn verify_proof_of_work(
        &self,
        pre_hash: &Hash,
        nonce: u64,
        difficulty: f64,
    ) -> ConsensusResult<bool>;
}
