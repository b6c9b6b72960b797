//! Exponential moving average
//!
//! Used for both the work-rate and the inter-block time streams. The two
//! streams never share state; each caller threads its own previous average.

/// EMA updater with a fixed smoothing constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ema {
    alpha: f64,
}

impl Ema {
    /// Create an updater. `alpha` is the weight of the newest sample.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Smoothing constant.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fold `sample` into `previous`: `alpha * sample + (1 - alpha) * previous`.
    pub fn update(&self, sample: f64, previous: f64) -> f64 {
        self.alpha * sample + (1.0 - self.alpha) * previous
    }
}
