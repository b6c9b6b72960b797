//! # Ghost-Chain Consensus Benchmarks
//!
//! | Path | Runs | Target |
//! |------|------|--------|
//! | Target derivation | once per header | < 1µs |
//! | Structural checks + retarget | once per header | < 1µs |
//! | Uncle window insert | once per accepted header | O(log n) |

use criterion::{criterion_group, criterion_main};
use ghost_tests::benchmarks::{header_validation, target_codec};

criterion_group!(
    benches,
    target_codec::bench_derive_target,
    target_codec::bench_is_acceptable,
    header_validation::bench_header_checks,
    header_validation::bench_uncle_tracker,
);

criterion_main!(benches);
