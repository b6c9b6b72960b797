//! # Integration Flows
//!
//! Drives `GhostConsensusService` end to end with the in-memory database,
//! the SHA-256d hasher and real nonce search.

pub mod fixtures;
mod flows;
