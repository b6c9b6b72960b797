//! Consensus configuration
//!
//! Every consensus constant is injected through `ConsensusConfig` so tests
//! and alternative networks can vary them.
//!
//! ```toml
//! block_reward = 120000000000
//! target_mean_time_ms = 21640.425613334453
//! min_block_spacing_ms = 50
//! max_uncles = 10
//! max_uncle_height_delta = 10
//! recent_header_tracking_range = 30
//! ema_alpha = 0.3
//! split_reward_among_uncles = true
//! target_length = 32
//! ```

use super::{ConsensusError, ConsensusResult};
use serde::Deserialize;
use shared_crypto::HASH_LENGTH;
use std::fs;
use std::path::Path;

/// Configuration for the GHOST consensus core
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Reward handed to the state-transition engine per block
    pub block_reward: u64,
    /// Desired mean time between blocks (milliseconds)
    pub target_mean_time_ms: f64,
    /// Minimum timestamp advance over the parent (milliseconds)
    pub min_block_spacing_ms: u64,
    /// Maximum uncles one header may declare
    pub max_uncles: usize,
    /// Maximum height distance between a block and its uncles
    pub max_uncle_height_delta: u64,
    /// Depth of the recent-header window kept for uncle selection
    pub recent_header_tracking_range: u64,
    /// EMA smoothing constant in (0, 1]
    pub ema_alpha: f64,
    /// Whether the block reward is split among uncle miners
    pub split_reward_among_uncles: bool,
    /// Proof-of-work target length (bytes)
    pub target_length: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            block_reward: 120_000_000_000,
            // 15 second median block time
            target_mean_time_ms: 15_000.0 / std::f64::consts::LN_2,
            min_block_spacing_ms: 50,
            max_uncles: 10,
            max_uncle_height_delta: 10,
            recent_header_tracking_range: 30,
            ema_alpha: 0.3,
            split_reward_among_uncles: true,
            target_length: HASH_LENGTH,
        }
    }
}

impl ConsensusConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or fails `validate`.
    pub fn load<P: AsRef<Path>>(path: P) -> ConsensusResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConsensusError::InvalidConfig(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> ConsensusResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConsensusError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the consensus arithmetic relies on.
    pub fn validate(&self) -> ConsensusResult<()> {
        if !(self.ema_alpha > 0.0 && self.ema_alpha <= 1.0) {
            return Err(ConsensusError::InvalidConfig(format!(
                "ema_alpha must be in (0, 1], got {}",
                self.ema_alpha
            )));
        }
        if !(self.target_mean_time_ms.is_finite() && self.target_mean_time_ms > 0.0) {
            return Err(ConsensusError::InvalidConfig(format!(
                "target_mean_time_ms must be positive, got {}",
                self.target_mean_time_ms
            )));
        }
        if self.target_length != HASH_LENGTH {
            return Err(ConsensusError::InvalidConfig(format!(
                "target_length must equal the proof-of-work hash length ({}), got {}",
                HASH_LENGTH, self.target_length
            )));
        }
        if self.recent_header_tracking_range < self.max_uncle_height_delta {
            return Err(ConsensusError::InvalidConfig(format!(
                "recent_header_tracking_range ({}) is shorter than max_uncle_height_delta ({})",
                self.recent_header_tracking_range, self.max_uncle_height_delta
            )));
        }
        Ok(())
    }
}
