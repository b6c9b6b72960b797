//! EMA difficulty retargeting
//!
//! Difficulty is steered toward a constant mean block time. Each accepted
//! header folds its work (`1/difficulty`) and its time since the parent into
//! two EMAs; their ratio estimates the network hashrate, and the next
//! difficulty is the probability that makes the expected time to the next
//! block equal the target mean time:
//!
//! ```text
//! hashes_per_ms   = work_ema / t_ema
//! next_difficulty = 1 / (hashes_per_ms * target_mean_time)
//! ```

use super::{BlockRecord, Ema};

/// Values derived for a child of `parent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Retarget {
    /// Work proved by the child (`1 / parent.next_difficulty`)
    pub work: f64,
    /// Smoothed work per block
    pub work_ema: f64,
    /// Smoothed inter-block time (ms)
    pub t_ema: f64,
    /// Difficulty the grandchild must declare
    pub next_difficulty: f64,
}

/// Difficulty adjustment calculator
#[derive(Clone, Debug)]
pub struct DifficultyAdjuster {
    ema: Ema,
    target_mean_time_ms: f64,
}

impl DifficultyAdjuster {
    /// Create a new difficulty adjuster
    pub fn new(ema: Ema, target_mean_time_ms: f64) -> Self {
        Self {
            ema,
            target_mean_time_ms,
        }
    }

    /// Retarget for a child of `parent` stamped at `timestamp`.
    ///
    /// A child of genesis contributes the target mean time as its interval:
    /// the genesis timestamp says nothing about mining speed.
    pub fn retarget(&self, parent: &BlockRecord, timestamp: u64) -> Retarget {
        let work = 1.0 / parent.next_difficulty;
        let work_ema = self.ema.update(work, parent.p_ema);

        let time_delta = if parent.height > 0 {
            timestamp.saturating_sub(parent.header.timestamp()) as f64
        } else {
            self.target_mean_time_ms
        };
        let t_ema = self.ema.update(time_delta, parent.t_ema);

        let hashes_per_ms = work_ema / t_ema;
        let next_block_target_hashes = hashes_per_ms * self.target_mean_time_ms;
        let next_difficulty = 1.0 / next_block_target_hashes;

        Retarget {
            work,
            work_ema,
            t_ema,
            next_difficulty,
        }
    }
}
