// Core feed modules

pub mod types;
pub mod pair_store;
pub mod generator;
pub mod publisher;
pub mod feed;

// Re-export commonly used types
pub use types::{seed_pairs, Direction, Leverage, Tick, TradingPair};
pub use pair_store::PairStore;
pub use generator::FeedGenerator;
pub use publisher::{ConsoleGrid, DisplayTarget, FeedPublisher, GridRegion, PublishReport};
pub use feed::{FeedHandle, FeedSource, FeedState, MarketFeed};
