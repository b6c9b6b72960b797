//! # Test Fixtures
//!
//! `TestChain` wires `GhostConsensusService` to the in-memory database, the
//! in-memory missing-uncle sink and the SHA-256d hasher, and persists every
//! status change the way a node's storage layer would.

use async_trait::async_trait;
use ghost_consensus::{
    derive_target, search_nonce, AcceptanceResult, BlockApplication, BlockRecord, BlockStatus,
    ConsensusConfig, ConsensusDependencies, ConsensusResult, GhostConsensusApi,
    GhostConsensusService, InMemoryBlockDatabase, InMemoryMissingUncleSink, NonceSearchOutcome,
    ProcessRequest, Sha256dPowHasher, StateTransition, UncleCandidate,
};
use parking_lot::Mutex;
use shared_crypto::{blake2b_hash, empty_hash, hash_from_slice, HashLengthError};
use shared_types::{Block, BlockHeader, GenesisHeader, Hash};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Difficulty every child of genesis declares.
pub const GENESIS_NEXT_DIFFICULTY: f64 = 0.25;

/// Genesis timestamp (ms).
pub const GENESIS_TIMESTAMP: u64 = 1_000_000;

/// A block handed to the state transition engine.
#[derive(Clone, Debug)]
pub struct AppliedBlock {
    pub hash: Hash,
    pub height: u64,
    pub reward: u64,
    pub uncles: Vec<UncleCandidate>,
}

/// Accepts every block and records what it was given.
#[derive(Default)]
pub struct RecordingStateTransition {
    applied: Mutex<Vec<AppliedBlock>>,
}

impl RecordingStateTransition {
    pub fn applied(&self) -> Vec<AppliedBlock> {
        self.applied.lock().clone()
    }
}

#[async_trait]
impl StateTransition for RecordingStateTransition {
    async fn apply_block(
        &self,
        application: BlockApplication<'_>,
        result: &mut AcceptanceResult,
    ) -> Result<(), String> {
        self.applied.lock().push(AppliedBlock {
            hash: *application.hash,
            height: application.parent_record.height + 1,
            reward: application.reward,
            uncles: application.uncles.to_vec(),
        });
        result.status = BlockStatus::Block;
        Ok(())
    }
}

pub type TestService = GhostConsensusService<
    InMemoryBlockDatabase,
    Sha256dPowHasher,
    RecordingStateTransition,
    InMemoryMissingUncleSink,
>;

/// A single-node chain over the real adapters.
pub struct TestChain {
    pub service: TestService,
    pub db: Arc<InMemoryBlockDatabase>,
    pub sink: Arc<InMemoryMissingUncleSink>,
    pub engine: Arc<RecordingStateTransition>,
    pub genesis_hash: Hash,
}

impl TestChain {
    pub fn new() -> Self {
        Self::with_config(ConsensusConfig::default())
    }

    pub fn with_config(config: ConsensusConfig) -> Self {
        let db = Arc::new(InMemoryBlockDatabase::new());
        let sink = Arc::new(InMemoryMissingUncleSink::new());
        let engine = Arc::new(RecordingStateTransition::default());

        let genesis = GenesisHeader {
            merkle_root: empty_hash(),
            state_root: empty_hash(),
            timestamp: GENESIS_TIMESTAMP,
        };
        let genesis_hash = genesis.hash();
        let record = BlockRecord::genesis(
            genesis,
            config.target_mean_time_ms,
            1.0 / GENESIS_NEXT_DIFFICULTY,
            GENESIS_NEXT_DIFFICULTY,
        );
        db.put(genesis_hash, record, BlockStatus::MainChain);

        let service = GhostConsensusService::new(ConsensusDependencies {
            database: Arc::clone(&db),
            hasher: Arc::new(Sha256dPowHasher::new()),
            state_transition: Arc::clone(&engine),
            missing_uncles: Arc::clone(&sink),
            config,
        })
        .expect("valid test config");

        Self {
            service,
            db,
            sink,
            engine,
            genesis_hash,
        }
    }

    /// Unmined header on `parent_hash`, `offset_ms` after it.
    pub fn header_on(&self, parent_hash: Hash, offset_ms: u64, miner: u8) -> BlockHeader {
        let parent = self
            .db
            .record(&parent_hash)
            .expect("parent record must be stored");
        BlockHeader {
            previous_hash: vec![parent_hash],
            merkle_root: blake2b_hash(&[miner]),
            state_root: [0u8; 32],
            difficulty: parent.next_difficulty,
            timestamp: parent.header.timestamp() + offset_ms,
            nonce: 0,
            miner: [miner; 20],
        }
    }

    /// Find a nonce meeting the header's declared difficulty.
    pub fn mine(&self, mut header: BlockHeader) -> BlockHeader {
        let target = derive_target(header.difficulty, self.service.config().target_length);
        let stop = AtomicBool::new(false);
        let outcome = search_nonce(
            &header.pre_hash(),
            &target,
            0..u64::MAX,
            &stop,
            Sha256dPowHasher::hash,
        )
        .expect("32-byte target");

        match outcome {
            NonceSearchOutcome::Found(nonce) => header.nonce = nonce,
            other => panic!("nonce search ended without a nonce: {:?}", other),
        }
        header
    }

    /// Mined header on `parent_hash`.
    pub fn mine_on(&self, parent_hash: Hash, offset_ms: u64, miner: u8) -> BlockHeader {
        self.mine(self.header_on(parent_hash, offset_ms, miner))
    }

    /// Run `process()` for `header` and persist any status change.
    pub async fn submit(
        &self,
        header: &BlockHeader,
        with_block: bool,
    ) -> ConsensusResult<AcceptanceResult> {
        let hash = header.hash();
        let parent_hash = header.parent_hash().copied();
        let previous_record = parent_hash.and_then(|parent| self.db.record(&parent));
        let previous_status = parent_hash
            .map(|parent| self.db.status(&parent))
            .unwrap_or(BlockStatus::Nothing);

        let old_status = self.db.status(&hash);
        let result = match self.db.record(&hash) {
            Some(record) => AcceptanceResult::with_record(old_status, record),
            None => AcceptanceResult::new(old_status),
        };

        let result = self
            .service
            .process(ProcessRequest {
                previous_record,
                previous_status,
                hash,
                header: header.clone(),
                block: with_block.then(|| Block {
                    header: header.clone(),
                    transactions: vec![],
                }),
                result,
            })
            .await?;

        if result.changed() {
            match &result.record {
                Some(record) => self.db.put(hash, record.clone(), result.status),
                None => self.db.put_status(hash, result.status),
            }
        }
        Ok(result)
    }
}

/// Decode a block hash carried hex-encoded in a peer request.
pub fn decode_wire_hash(hex_hash: &str) -> Result<Hash, HashLengthError> {
    let bytes = hex::decode(hex_hash).expect("peer sent valid hex");
    hash_from_slice(&bytes)
}

impl Default for TestChain {
    fn default() -> Self {
        Self::new()
    }
}
