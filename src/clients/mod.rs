// External API clients

pub mod trading_api;

// Re-export client types
pub use trading_api::{ApiError, TradingApiClient, TradingDataResponse};
