// Configuration management for the trading feed

use crate::display::Locale;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// Environment variable that points the feed at a backend
pub const BACKEND_URL_ENV: &str = "TRADING_FEED_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_value_floor")]
    pub value_floor: f64,
    #[serde(default = "default_fluctuation_range")]
    pub fluctuation_range: f64,    // Total width of the value delta window
    #[serde(default = "default_change_range")]
    pub change_range: f64,         // Total width of the change percent window
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            value_floor: default_value_floor(),
            fluctuation_range: default_fluctuation_range(),
            change_range: default_change_range(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::EsEs,
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_tick_logging: bool,
    pub enable_publish_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_tick_logging: true,
            enable_publish_logging: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_interval_ms() -> u64 { 4000 }
fn default_value_floor() -> f64 { 1000.0 }
fn default_fluctuation_range() -> f64 { 100.0 }
fn default_change_range() -> f64 { 10.0 }
fn default_base_url() -> String { "http://localhost:8001".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_currency_symbol() -> String { "€".to_string() }

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            info!("📁 Created default config file: {}", path.as_ref().display());
            Ok(config)
        }
    }

    /// A backend URL in the environment wins over the file and turns the
    /// backend on.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(BACKEND_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                self.backend.base_url = url.trim_end_matches('/').to_string();
                self.backend.enabled = true;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.interval_ms == 0 {
            return Err(ConfigError::Validation("interval_ms must be greater than 0".to_string()));
        }

        if !self.feed.value_floor.is_finite() || self.feed.value_floor <= 0.0 {
            return Err(ConfigError::Validation("value_floor must be positive".to_string()));
        }

        if !self.feed.fluctuation_range.is_finite() || self.feed.fluctuation_range < 0.0 {
            return Err(ConfigError::Validation("fluctuation_range must be non-negative".to_string()));
        }

        if !self.feed.change_range.is_finite() || self.feed.change_range < 0.0 {
            return Err(ConfigError::Validation("change_range must be non-negative".to_string()));
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation("timeout_secs must be greater than 0".to_string()));
        }

        if !self.backend.base_url.starts_with("http://") && !self.backend.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.backend.base_url
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
