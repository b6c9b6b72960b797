//! # Consensus Metrics
//!
//! Prometheus metrics for header and block acceptance.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ghost-consensus = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `ghost_headers_accepted_total` - Headers that passed validation
//! - `ghost_headers_rejected_total` - Rejected headers (by reason)
//! - `ghost_blocks_applied_total` - Blocks that reached status Block
//! - `ghost_blocks_invalid_total` - Blocks marked InvalidBlock (by reason)
//! - `ghost_blocks_deferred_total` - Blocks waiting on missing uncles
//! - `ghost_header_validation_seconds` - Histogram of header validation times

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter, CounterVec, Histogram,
    IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref HEADERS_ACCEPTED: IntCounter = register_int_counter!(
        "ghost_headers_accepted_total",
        "Total number of headers that passed validation"
    )
    .expect("Failed to create HEADERS_ACCEPTED metric");

    pub static ref HEADERS_REJECTED: CounterVec = register_counter_vec!(
        "ghost_headers_rejected_total",
        "Total number of headers rejected",
        &["reason"]
    )
    .expect("Failed to create HEADERS_REJECTED metric");

    pub static ref BLOCKS_APPLIED: IntCounter = register_int_counter!(
        "ghost_blocks_applied_total",
        "Total number of blocks applied by the state transition engine"
    )
    .expect("Failed to create BLOCKS_APPLIED metric");

    pub static ref BLOCKS_INVALID: CounterVec = register_counter_vec!(
        "ghost_blocks_invalid_total",
        "Total number of blocks marked invalid",
        &["reason"]
    )
    .expect("Failed to create BLOCKS_INVALID metric");

    pub static ref BLOCKS_DEFERRED: IntCounter = register_int_counter!(
        "ghost_blocks_deferred_total",
        "Total number of blocks deferred on missing uncles"
    )
    .expect("Failed to create BLOCKS_DEFERRED metric");

    pub static ref HEADER_VALIDATION_LATENCY: Histogram = register_histogram!(
        "ghost_header_validation_seconds",
        "Time taken to validate a header in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    )
    .expect("Failed to create HEADER_VALIDATION_LATENCY metric");
}

#[cfg(feature = "metrics")]
pub fn record_header_accepted() {
    HEADERS_ACCEPTED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_header_rejected(reason: &str) {
    HEADERS_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_block_applied() {
    BLOCKS_APPLIED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_block_invalid(reason: &str) {
    BLOCKS_INVALID.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_block_deferred() {
    BLOCKS_DEFERRED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_header_validation_latency(seconds: f64) {
    HEADER_VALIDATION_LATENCY.observe(seconds);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_header_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_header_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_block_applied() {}

#[cfg(not(feature = "metrics"))]
pub fn record_block_invalid(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_block_deferred() {}

#[cfg(not(feature = "metrics"))]
pub fn record_header_validation_latency(_seconds: f64) {}
