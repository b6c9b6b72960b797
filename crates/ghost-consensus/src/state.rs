use crate::domain::{ConsensusConfig, UncleCandidate, UncleTracker};
use parking_lot::RwLock;
use shared_types::{Address, Hash};
use std::collections::HashSet;

/// Mutable state shared by concurrent `process()` calls.
///
/// Only the uncle window lives here; records and statuses belong to the
/// database collaborator.
pub struct ConsensusState {
    pub uncles: RwLock<UncleTracker>,
}

impl ConsensusState {
    pub fn new(config: &ConsensusConfig) -> Self {
        Self {
            uncles: RwLock::new(UncleTracker::new(
                config.recent_header_tracking_range,
                config.max_uncle_height_delta,
            )),
        }
    }

    pub fn record_header(&self, height: u64, hash: Hash, miner: Address) {
        self.uncles.write().record_header(height, hash, miner);
    }

    /// Uncles a new block at `height` could cite.
    pub fn uncle_candidates(
        &self,
        height: u64,
        exclude: &HashSet<Hash>,
        limit: usize,
    ) -> Vec<UncleCandidate> {
        self.uncles.read().candidates_for(height, exclude, limit)
    }
}
