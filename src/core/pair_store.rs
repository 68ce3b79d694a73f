// In-memory working set of trading pairs for one session

use crate::core::types::TradingPair;

#[derive(Debug, Clone, Default)]
pub struct PairStore {
    pairs: Vec<TradingPair>,
    initialized: bool,
}

impl PairStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working set to the seed values. Called once at startup.
    pub fn initialize(&mut self, seed: Vec<TradingPair>) {
        self.pairs = seed;
        self.initialized = true;
    }

    /// State as of the latest completed tick; empty before initialization
    pub fn current(&self) -> &[TradingPair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [TradingPair] {
        &mut self.pairs
    }

    /// Swap in a full pair list received from the backend
    pub fn replace(&mut self, pairs: Vec<TradingPair>) {
        self.pairs = pairs;
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
