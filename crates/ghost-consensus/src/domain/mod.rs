//! Domain layer for GHOST consensus
//!
//! Pure types and calculations; no I/O.
//!
//! - target: difficulty to PoW target codec
//! - ema / difficulty: EMA retargeting
//! - uncle_tracker: recent-header window and uncle eligibility
//! - pow: PoW input framing and nonce search

mod config;
mod difficulty;
mod ema;
mod error;
mod pow;
mod record;
mod status;
mod target;
mod uncle_tracker;

pub use config::*;
pub use difficulty::*;
pub use ema::*;
pub use error::*;
pub use pow::*;
pub use record::*;
pub use status::*;
pub use target::*;
pub use uncle_tracker::*;
