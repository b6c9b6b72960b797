//! # Ghost-Chain Benchmarks
//!
//! Criterion groups for the per-header hot paths: target derivation,
//! target comparison and the header checks that run before the PoW hash.
