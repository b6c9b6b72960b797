//! GHOST Consensus Service - Core business logic
//!
//! # Flow
//! - Header step: structural checks, proof of work, retarget, draft record
//! - Block step: resolve the uncle set, hand the block to the state
//!   transition engine, fold uncle work into the record
//!
//! Validation outcomes land on the call's `AcceptanceResult`; `Err` is
//! reserved for collaborator failures and caller contract violations.

use crate::domain::{
    derive_target, is_acceptable, pow_input, AcceptanceResult, BlockRecord, BlockStatus,
    CandidateCheck, ConsensusConfig, ConsensusError, ConsensusResult, DifficultyAdjuster, Ema,
    RejectReason, UncleCandidate,
};
use crate::events::MissingUnclesEvent;
use crate::ports::{
    BlockApplication, BlockDatabase, GhostConsensusApi, MissingUncleSink, PowHasher,
    ProcessRequest, StateTransition,
};
use crate::state::ConsensusState;
use crate::validation::HeaderValidator;
use async_trait::async_trait;
use futures::future::join_all;
use shared_types::{Block, BlockHeader, ChainHeader, Hash};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Credited uncles of a block and the work they add.
#[derive(Clone, Debug, PartialEq)]
pub struct UncleResolution {
    /// Sum of `1/difficulty` over the uncles
    pub work: f64,
    pub candidates: Vec<UncleCandidate>,
}

/// GHOST Consensus Service
pub struct GhostConsensusService<D, P, S, N>
where
    D: BlockDatabase,
    P: PowHasher,
    S: StateTransition,
    N: MissingUncleSink,
{
    database: Arc<D>,
    hasher: Arc<P>,
    state_transition: Arc<S>,
    missing_uncles: Arc<N>,
    state: Arc<ConsensusState>,
    adjuster: DifficultyAdjuster,
    config: ConsensusConfig,
}

/// Dependencies for GhostConsensusService
pub struct ConsensusDependencies<D, P, S, N> {
    pub database: Arc<D>,
    pub hasher: Arc<P>,
    pub state_transition: Arc<S>,
    pub missing_uncles: Arc<N>,
    pub config: ConsensusConfig,
}

impl<D, P, S, N> GhostConsensusService<D, P, S, N>
where
    D: BlockDatabase,
    P: PowHasher,
    S: StateTransition,
    N: MissingUncleSink,
{
    /// Create a new service. Fails if the configuration is invalid.
    pub fn new(deps: ConsensusDependencies<D, P, S, N>) -> ConsensusResult<Self> {
        let state = Arc::new(ConsensusState::new(&deps.config));
        Self::with_state(deps, state)
    }

    /// Create a service sharing an existing uncle window.
    pub fn with_state(
        deps: ConsensusDependencies<D, P, S, N>,
        state: Arc<ConsensusState>,
    ) -> ConsensusResult<Self> {
        deps.config.validate()?;
        let adjuster = DifficultyAdjuster::new(
            Ema::new(deps.config.ema_alpha),
            deps.config.target_mean_time_ms,
        );

        Ok(Self {
            database: deps.database,
            hasher: deps.hasher,
            state_transition: deps.state_transition,
            missing_uncles: deps.missing_uncles,
            state,
            adjuster,
            config: deps.config,
        })
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    pub fn state(&self) -> &Arc<ConsensusState> {
        &self.state
    }

    /// Uncles a new block at `height` could cite, excluding its ancestors.
    pub fn uncle_candidates(&self, height: u64, ancestors: &HashSet<Hash>) -> Vec<UncleCandidate> {
        self.state
            .uncle_candidates(height, ancestors, self.config.max_uncles)
    }

    /// Hash `pre_hash ‖ nonce` and compare it with the target for `difficulty`.
    pub async fn check_proof_of_work(
        &self,
        pre_hash: &Hash,
        nonce: u64,
        difficulty: f64,
    ) -> ConsensusResult<bool> {
        let input = pow_input(pre_hash, nonce).to_vec();
        let hash = self
            .hasher
            .pow_hash(input)
            .await
            .map_err(ConsensusError::PowHasher)?;
        let target = derive_target(difficulty, self.config.target_length);
        is_acceptable(&hash, &target)
    }

    fn reject(&self, hash: &Hash, result: &mut AcceptanceResult, reason: RejectReason) {
        warn!("Rejecting header {}: {}", hex::encode(hash), reason);
        crate::metrics::record_header_rejected(reason.label());
        result.status = BlockStatus::Rejected;
    }

    fn invalidate(&self, hash: &Hash, result: &mut AcceptanceResult, reason: &'static str) {
        warn!("Block {} is invalid: {}", hex::encode(hash), reason);
        crate::metrics::record_block_invalid(reason);
        result.status = BlockStatus::InvalidBlock;
    }

    /// Validate a header against its parent and build its draft record.
    ///
    /// On success the header is tracked as a future uncle candidate and
    /// `result` moves to `Header` with a draft record. Failures move it to
    /// `Rejected`.
    #[instrument(skip(self, parent, hash, header, result), fields(hash = %hex::encode(hash)))]
    pub async fn process_header(
        &self,
        parent: Option<&BlockRecord>,
        hash: &Hash,
        header: &BlockHeader,
        result: &mut AcceptanceResult,
    ) -> ConsensusResult<()> {
        let start_time = std::time::Instant::now();

        let Some(parent) = parent else {
            self.reject(hash, result, RejectReason::NoParent);
            return Ok(());
        };

        if let Err(reason) = HeaderValidator::validate(header, parent, &self.config) {
            self.reject(hash, result, reason);
            return Ok(());
        }

        let pre_hash = header.pre_hash();
        if !self
            .check_proof_of_work(&pre_hash, header.nonce, header.difficulty)
            .await?
        {
            self.reject(
                hash,
                result,
                RejectReason::InsufficientWork {
                    difficulty: header.difficulty,
                },
            );
            return Ok(());
        }

        let height = parent.height + 1;
        self.state.record_header(height, *hash, header.miner);

        let retarget = self.adjuster.retarget(parent, header.timestamp);
        result.record = Some(BlockRecord {
            header: ChainHeader::Block(header.clone()),
            height,
            t_ema: retarget.t_ema,
            p_ema: retarget.work_ema,
            next_difficulty: retarget.next_difficulty,
            total_work: parent.total_work + retarget.work,
        });
        result.status = BlockStatus::Header;

        crate::metrics::record_header_accepted();
        crate::metrics::record_header_validation_latency(start_time.elapsed().as_secs_f64());
        debug!(
            "Accepted header at height {}, next difficulty {:e}",
            height, retarget.next_difficulty
        );
        Ok(())
    }

    /// Resolve the uncle set declared by `header`.
    ///
    /// Returns `None` when the block cannot be finalized yet (missing uncles,
    /// `result` unchanged) or at all (`result` set to `InvalidBlock`).
    #[instrument(
        skip(self, hash, header, parent, result),
        fields(hash = %hex::encode(hash), height = parent.height + 1)
    )]
    pub async fn resolve_uncles(
        &self,
        hash: &Hash,
        header: &BlockHeader,
        parent: &BlockRecord,
        result: &mut AcceptanceResult,
    ) -> ConsensusResult<Option<UncleResolution>> {
        let height = parent.height + 1;

        let mut seen = HashSet::new();
        let uncles: Vec<Hash> = header
            .uncle_hashes()
            .iter()
            .filter(|uncle| seen.insert(**uncle))
            .copied()
            .collect();

        let statuses = join_all(
            uncles
                .iter()
                .map(|uncle| self.database.get_block_status(uncle)),
        )
        .await;

        let mut missing = Vec::new();
        let mut rejected = false;
        for (uncle, status) in uncles.iter().zip(statuses) {
            match status.map_err(ConsensusError::Database)? {
                BlockStatus::Header
                | BlockStatus::Block
                | BlockStatus::MainChain
                | BlockStatus::InvalidBlock => {}
                BlockStatus::Nothing => {
                    warn!("Uncle {} is unknown", hex::encode(uncle));
                    missing.push(*uncle);
                }
                BlockStatus::Rejected => {
                    warn!("Uncle {} was rejected", hex::encode(uncle));
                    rejected = true;
                }
            }
        }

        let deferred = !missing.is_empty();
        if deferred {
            self.missing_uncles
                .notify_missing_uncles(MissingUnclesEvent::new(height, missing))
                .await
                .unwrap_or_else(|e| warn!("Missing uncle notification failed: {}", e));
            if !rejected {
                crate::metrics::record_block_deferred();
            }
        }
        if rejected {
            self.invalidate(hash, result, "rejected_uncle");
            return Ok(None);
        }
        if deferred {
            return Ok(None);
        }

        let records = join_all(
            uncles
                .iter()
                .map(|uncle| self.database.get_block_record(uncle)),
        )
        .await;
        let mut resolved = Vec::with_capacity(uncles.len());
        for (uncle, record) in uncles.iter().zip(records) {
            let record = record
                .map_err(ConsensusError::Database)?
                .ok_or(ConsensusError::MissingUncleRecord(*uncle))?;
            resolved.push((*uncle, record));
        }

        let check = self.state.uncles.read().validate_candidates(&resolved, height);
        let candidates = match check {
            CandidateCheck::Eligible(candidates) => candidates,
            CandidateCheck::Ineligible { hash: uncle, reason } => {
                warn!("Uncle {} is not eligible: {:?}", hex::encode(uncle), reason);
                self.invalidate(hash, result, "ineligible_uncle");
                return Ok(None);
            }
        };

        let work = resolved
            .iter()
            .filter_map(|(_, record)| record.header.as_block_header())
            .map(|uncle| 1.0 / uncle.difficulty)
            .sum();

        if let Some(record) = &result.record {
            debug!(
                "Block {}: pEMA {:.0} H / tEMA {:.3} s = {:.0} H/s",
                record.height,
                record.p_ema,
                record.t_ema / 1000.0,
                record.hashrate()
            );
        }

        Ok(Some(UncleResolution { work, candidates }))
    }

    /// Finalize a block whose header has already been validated.
    #[instrument(
        skip(self, block, hash, header, parent, result),
        fields(hash = %hex::encode(hash))
    )]
    pub async fn process_block(
        &self,
        block: &Block,
        hash: &Hash,
        header: &BlockHeader,
        parent: &BlockRecord,
        result: &mut AcceptanceResult,
    ) -> ConsensusResult<()> {
        let Some(resolution) = self.resolve_uncles(hash, header, parent, result).await? else {
            error!("Failed to process uncles of block {}", hex::encode(hash));
            return Ok(());
        };

        let application = BlockApplication {
            block,
            hash,
            header,
            parent_record: parent,
            reward: self.config.block_reward,
            split_reward_among_uncles: self.config.split_reward_among_uncles,
            uncles: &resolution.candidates,
        };
        self.state_transition
            .apply_block(application, result)
            .await
            .map_err(ConsensusError::StateTransition)?;

        if result.status == BlockStatus::Block {
            if let Some(record) = result.record.as_mut() {
                record.total_work += resolution.work;
                info!(
                    "Block {} applied at height {} with {} uncle(s), total work {:e}",
                    hex::encode(hash),
                    record.height,
                    resolution.candidates.len(),
                    record.total_work
                );
            }
            crate::metrics::record_block_applied();
        }
        Ok(())
    }

    async fn process_internal(&self, request: ProcessRequest) -> ConsensusResult<AcceptanceResult> {
        let ProcessRequest {
            previous_record,
            previous_status,
            hash,
            header,
            block,
            mut result,
        } = request;

        if result.old_status.is_terminal() {
            debug!(
                "Block {} already {:?}, nothing to do",
                hex::encode(hash),
                result.old_status
            );
            return Ok(result);
        }

        if result.old_status == BlockStatus::Nothing {
            self.process_header(previous_record.as_ref(), &hash, &header, &mut result)
                .await?;
            if result.status == BlockStatus::Rejected {
                return Ok(result);
            }
        }

        let Some(block) = block else {
            return Ok(result);
        };
        if !previous_status.is_at_least(BlockStatus::Block) {
            return Ok(result);
        }
        if !result.old_status.is_at_most(BlockStatus::Header) {
            return Ok(result);
        }

        if result.record.is_none() {
            let record = self
                .database
                .get_block_record(&hash)
                .await
                .map_err(ConsensusError::Database)?
                .ok_or(ConsensusError::MissingBlockRecord(hash))?;
            result.record = Some(record);
        }

        let parent = previous_record.ok_or(ConsensusError::MissingParentRecord(hash))?;
        self.process_block(&block, &hash, &header, &parent, &mut result)
            .await?;
        Ok(result)
    }
}

#[async_trait]
impl<D, P, S, N> GhostConsensusApi for GhostConsensusService<D, P, S, N>
where
    D: BlockDatabase + 'static,
    P: PowHasher + 'static,
    S: StateTransition + 'static,
    N: MissingUncleSink + 'static,
{
    async fn process(&self, request: ProcessRequest) -> ConsensusResult<AcceptanceResult> {
        self.process_internal(request).await
    }

    async fn verify_proof_of_work(
        &self,
        pre_hash: &Hash,
        nonce: u64,
        difficulty: f64,
    ) -> ConsensusResult<bool> {
        self.check_proof_of_work(pre_hash, nonce, difficulty).await
    }
}
