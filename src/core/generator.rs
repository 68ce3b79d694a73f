// Simulated market tick generation

use crate::config::FeedConfig;
use crate::core::types::{Direction, Leverage, TradingPair};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces the next value of every tracked pair.
///
/// Each field is an independent draw: the sign of `change_percent` and the
/// direction are not derived from the value delta.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    rng: StdRng,
    config: FeedConfig,
}

impl Default for FeedGenerator {
    fn default() -> Self {
        Self::new(FeedConfig::default())
    }
}

impl FeedGenerator {
    pub fn new(config: FeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, config }
    }

    /// Deterministic generator with default parameters
    pub fn with_seed(seed: u64) -> Self {
        Self::new(FeedConfig {
            seed: Some(seed),
            ..FeedConfig::default()
        })
    }

    /// Update every pair in place, in order, four fields per pair.
    pub fn tick(&mut self, pairs: &mut [TradingPair]) {
        for pair in pairs.iter_mut() {
            self.advance(pair);
        }
    }

    fn advance(&mut self, pair: &mut TradingPair) {
        let delta = self.centered(self.config.fluctuation_range);
        pair.value = (pair.value + delta).max(self.config.value_floor);

        pair.change_percent = self.centered(self.config.change_range);

        pair.direction = if self.rng.gen::<f64>() > 0.5 {
            Direction::Long
        } else {
            Direction::Short
        };

        let idx = self.rng.gen_range(0..Leverage::ALL.len());
        pair.leverage = Leverage::ALL[idx];
    }

    /// `(U - 0.5) * range` with U uniform on [0, 1)
    fn centered(&mut self, range: f64) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * range
    }
}
