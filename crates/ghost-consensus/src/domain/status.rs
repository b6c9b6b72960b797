//! Block acceptance status
//!
//! Statuses form a partial order. `Nothing < Header < Block < MainChain` is
//! the acceptance lattice a hash climbs as more of it is validated.
//! `Rejected` and `InvalidBlock` are terminal sinks outside the lattice:
//! they compare with nothing, including each other.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Validation depth reached by a block hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockStatus {
    /// Unknown hash.
    Nothing,
    /// Header passed validation.
    Header,
    /// Header and body passed validation.
    Block,
    /// Block is on the canonical chain.
    MainChain,
    /// Header is structurally or cryptographically invalid.
    Rejected,
    /// Header was valid but the body or its uncle set was not.
    InvalidBlock,
}

impl BlockStatus {
    /// Position in the acceptance lattice, `None` for terminal markers.
    fn rank(self) -> Option<u8> {
        match self {
            BlockStatus::Nothing => Some(0),
            BlockStatus::Header => Some(1),
            BlockStatus::Block => Some(2),
            BlockStatus::MainChain => Some(3),
            BlockStatus::Rejected | BlockStatus::InvalidBlock => None,
        }
    }

    /// No further transition is attempted once a terminal status is reached.
    pub fn is_terminal(self) -> bool {
        self.rank().is_none()
    }

    /// True if both statuses are in the lattice and `self >= other`.
    ///
    /// False when either side is terminal, unless both are the same status.
    pub fn is_at_least(self, other: BlockStatus) -> bool {
        matches!(self.partial_cmp(&other), Some(Ordering::Greater | Ordering::Equal))
    }

    /// True if both statuses are in the lattice and `self <= other`.
    pub fn is_at_most(self, other: BlockStatus) -> bool {
        matches!(self.partial_cmp(&other), Some(Ordering::Less | Ordering::Equal))
    }
}

impl PartialOrd for BlockStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}
