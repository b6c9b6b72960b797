//! Error types for the consensus core
//!
//! Validation outcomes (rejected headers, invalid blocks, deferred uncle
//! resolution) are recorded on the `AcceptanceResult` and never surface here.
//! `ConsensusError` is reserved for collaborator failures and caller
//! contract violations.

use shared_types::Hash;
use thiserror::Error;

/// Consensus error types
#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Proof-of-work hasher error: {0}")]
    PowHasher(String),

    #[error("State transition error: {0}")]
    StateTransition(String),

    #[error("Length mismatch: hash is {hash} bytes, target is {target} bytes")]
    LengthMismatch { hash: usize, target: usize },

    #[error("No block record for validated header: {0:?}")]
    MissingBlockRecord(Hash),

    #[error("No parent record supplied for block {0:?}")]
    MissingParentRecord(Hash),

    #[error("Uncle {0:?} has a status but no block record")]
    MissingUncleRecord(Hash),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;

/// Why a header was rejected.
///
/// Logged and counted; the caller only sees `BlockStatus::Rejected`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("header has no primary parent")]
    NoParent,

    #[error("timestamp {timestamp} is less than {min_spacing}ms after parent {parent}")]
    TimestampTooEarly {
        timestamp: u64,
        parent: u64,
        min_spacing: u64,
    },

    #[error("header has too many uncles ({count}), the maximum is {max}")]
    TooManyUncles { count: usize, max: usize },

    #[error("difficulty ({declared}) does not match calculated value ({expected})")]
    DifficultyMismatch { declared: f64, expected: f64 },

    #[error("hash does not meet difficulty ({difficulty})")]
    InsufficientWork { difficulty: f64 },
}

impl RejectReason {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::NoParent => "no_parent",
            RejectReason::TimestampTooEarly { .. } => "timestamp",
            RejectReason::TooManyUncles { .. } => "too_many_uncles",
            RejectReason::DifficultyMismatch { .. } => "difficulty_mismatch",
            RejectReason::InsufficientWork { .. } => "insufficient_work",
        }
    }
}
