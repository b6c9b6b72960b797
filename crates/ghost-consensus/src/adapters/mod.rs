//! Adapters layer (Hexagonal Architecture)
//!
//! In-memory collaborators for tests and single-process nodes, plus the
//! default double SHA-256 proof-of-work hasher.

mod database;
mod missing_uncles;
mod pow_hasher;

pub use database::*;
pub use missing_uncles::*;
pub use pow_hasher::*;
