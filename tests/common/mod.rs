// Common test utilities and helpers

#![allow(dead_code)]

use trading_feed::{Config, Direction, FeedConfig, Leverage, LoggingConfig, TradingPair};

/// Create a test configuration with a fixed seed and quiet logging
pub fn create_test_config() -> Config {
    Config {
        feed: FeedConfig {
            seed: Some(2024),
            ..FeedConfig::default()
        },
        logging: LoggingConfig {
            enable_tick_logging: false,
            enable_publish_logging: false,
        },
        ..Config::default()
    }
}

/// Configuration pointing at a mock backend
pub fn create_backend_config(base_url: &str) -> Config {
    let mut config = create_test_config();
    config.backend.enabled = true;
    config.backend.base_url = base_url.to_string();
    config.backend.timeout_secs = 2;
    config
}

/// Pairs as the backend would report them
pub fn backend_pairs() -> Vec<TradingPair> {
    vec![
        TradingPair::new("BTC/USDT", 3.25, Direction::Short, Leverage::X50, 26001.5),
        TradingPair::new("ETH/USDT", -0.75, Direction::Long, Leverage::X5, 1850.0),
    ]
}

/// JSON body of a successful `GET /api/trading/data`
pub fn trading_data_body(pairs: &[TradingPair]) -> String {
    serde_json::json!({
        "pairs": pairs,
        "last_updated": "2024-05-01T10:15:30.123456",
    })
    .to_string()
}
