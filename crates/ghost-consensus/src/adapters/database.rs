//! In-memory block database adapter

use crate::domain::{BlockRecord, BlockStatus};
use crate::ports::BlockDatabase;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Hash;
use std::collections::HashMap;

/// Block records and statuses held in memory.
///
/// Implements the read-only `BlockDatabase` port; the `put_*` methods stand
/// in for the persistence collaborator.
pub struct InMemoryBlockDatabase {
    records: RwLock<HashMap<Hash, BlockRecord>>,
    statuses: RwLock<HashMap<Hash, BlockStatus>>,
}

impl InMemoryBlockDatabase {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            statuses: RwLock::new(HashMap::new()),
        }
    }

    /// Store a record and its status
    pub fn put(&self, hash: Hash, record: BlockRecord, status: BlockStatus) {
        self.records.write().insert(hash, record);
        self.statuses.write().insert(hash, status);
    }

    pub fn put_status(&self, hash: Hash, status: BlockStatus) {
        self.statuses.write().insert(hash, status);
    }

    pub fn record(&self, hash: &Hash) -> Option<BlockRecord> {
        self.records.read().get(hash).cloned()
    }

    pub fn status(&self, hash: &Hash) -> BlockStatus {
        self.statuses
            .read()
            .get(hash)
            .copied()
            .unwrap_or(BlockStatus::Nothing)
    }

    pub fn len(&self) -> usize {
        self.statuses.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.read().is_empty()
    }
}

impl Default for InMemoryBlockDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockDatabase for InMemoryBlockDatabase {
    async fn get_block_status(&self, hash: &Hash) -> Result<BlockStatus, String> {
        Ok(self.status(hash))
    }

    async fn get_block_record(&self, hash: &Hash) -> Result<Option<BlockRecord>, String> {
        Ok(self.record(hash))
    }
}
