//! # ghost-consensus
//!
//! GHOST-style proof-of-work consensus core for Ghost-Chain.
//!
//! ## Architecture
//!
//! The core decides, for each incoming header and block, whether it is
//! acceptable and what derived state it carries forward:
//!
//! ```text
//! process(header, block?)
//!     │
//!     ├─ header step ── structural checks ─ PoW ─ retarget ─ draft record
//!     │
//!     └─ block step ─── resolve uncles ─ state transition ─ uncle work
//! ```
//!
//! Difficulty is a probability per hash attempt and is retargeted from EMAs
//! of work and block time. Uncles (valid siblings cited by a descendant)
//! add their work to the citing block's total work.
//!
//! Storage, state transition and the hard PoW hash are collaborators behind
//! the traits in [`ports`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ghost_consensus::{ConsensusDependencies, GhostConsensusService, ProcessRequest};
//!
//! let service = GhostConsensusService::new(ConsensusDependencies {
//!     database,
//!     hasher: Arc::new(Sha256dPowHasher::new()),
//!     state_transition,
//!     missing_uncles,
//!     config: ConsensusConfig::load("ghost.toml")?,
//! })?;
//!
//! let result = service.process(request).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod state;
pub mod validation;

// Re-export main types
pub use adapters::{InMemoryBlockDatabase, InMemoryMissingUncleSink, Sha256dPowHasher};
pub use domain::{
    derive_target, is_acceptable, pow_input, search_nonce, AcceptanceResult, BlockRecord,
    BlockStatus, ConsensusConfig, ConsensusError, ConsensusResult, NonceSearchOutcome,
    RejectReason, UncleCandidate, UncleTracker,
};
pub use events::MissingUnclesEvent;
pub use ports::{
    BlockApplication, BlockDatabase, GhostConsensusApi, MissingUncleSink, PowHasher,
    ProcessRequest, StateTransition,
};
pub use service::{ConsensusDependencies, GhostConsensusService, UncleResolution};
