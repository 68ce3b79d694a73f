// Common types shared by the feed, the publisher and the REST client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated position bias shown per pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "LONG")]
    Long,
    #[serde(rename = "SHORT")]
    Short,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }

    /// Lowercase style class used by grid cards
    pub fn css_class(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cosmetic leverage label, drawn from a fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leverage {
    #[serde(rename = "5x")]
    X5,
    #[serde(rename = "10x")]
    X10,
    #[serde(rename = "20x")]
    X20,
    #[serde(rename = "50x")]
    X50,
}

impl Leverage {
    /// Every leverage option, in draw order
    pub const ALL: [Leverage; 4] = [Leverage::X5, Leverage::X10, Leverage::X20, Leverage::X50];

    pub fn multiplier(&self) -> u32 {
        match self {
            Leverage::X5 => 5,
            Leverage::X10 => 10,
            Leverage::X20 => 20,
            Leverage::X50 => 50,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Leverage::X5 => "5x",
            Leverage::X10 => "10x",
            Leverage::X20 => "20x",
            Leverage::X50 => "50x",
        }
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tracked pair. Field names on the wire follow the backend payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPair {
    pub pair: String,
    #[serde(rename = "change")]
    pub change_percent: f64,
    pub direction: Direction,
    pub leverage: Leverage,
    pub value: f64,
}

impl TradingPair {
    pub fn new(
        pair: &str,
        change_percent: f64,
        direction: Direction,
        leverage: Leverage,
        value: f64,
    ) -> Self {
        Self {
            pair: pair.to_string(),
            change_percent,
            direction,
            leverage,
            value,
        }
    }
}

/// Starting values every fresh session is seeded with
pub fn seed_pairs() -> Vec<TradingPair> {
    vec![
        TradingPair::new("BTC/USDT", 2.61, Direction::Long, Leverage::X20, 25766.2),
        TradingPair::new("ETH/USDT", -1.51, Direction::Short, Leverage::X10, 32751.53),
        TradingPair::new("BNB/USDT", 5.78, Direction::Long, Leverage::X5, 38132.37),
        TradingPair::new("ADA/USDT", 1.72, Direction::Short, Leverage::X50, 32971.98),
    ]
}

/// Snapshot of one completed tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub sequence: u64,
    pub pairs: Vec<TradingPair>,
    pub generated_at: DateTime<Utc>,
}

impl Tick {
    pub fn new(sequence: u64, pairs: Vec<TradingPair>) -> Self {
        Self {
            sequence,
            pairs,
            generated_at: Utc::now(),
        }
    }
}
