// Trading Feed Library
//
// Simulated market-data feed for a crypto trading dashboard, with an optional
// backend-driven mode that polls the platform's trading data endpoint.

pub mod core;
pub mod clients;
pub mod config;
pub mod display;     // Grid card formatting
pub mod error;       // Unified error handling

// Re-export core feed types
pub use crate::core::{
    seed_pairs, ConsoleGrid, Direction, DisplayTarget, FeedGenerator, FeedHandle, FeedPublisher,
    FeedSource, FeedState, GridRegion, Leverage, MarketFeed, PairStore, PublishReport, Tick,
    TradingPair,
};

// Re-export error types
pub use error::{FeedError, FeedResult};

// Re-export client types
pub use clients::{ApiError, TradingApiClient, TradingDataResponse};

// Re-export configuration
pub use config::{BackendConfig, Config, ConfigError, DisplayConfig, FeedConfig, LoggingConfig};

// Re-export display helpers
pub use display::{format_change_percent, format_money, render_cards, ChangeTone, Locale, TradingCard};
