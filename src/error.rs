//! Unified error handling for the trading feed
//!
//! The feed itself cannot fail; errors come from configuration, the
//! backend client and file IO around it.

use crate::clients::ApiError;
use crate::config::ConfigError;
use std::fmt;
use std::io;

/// Main error type for the trading feed
#[derive(Debug)]
pub enum FeedError {
    // Configuration errors
    ConfigNotFound(String),
    ConfigParse(String),
    ConfigValidation(String),

    // Backend errors
    Api(ApiError),

    // IO errors
    FileRead(String),
    FileWrite(String),

    // General errors
    Internal(String),
}

impl FeedError {
    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            FeedError::ConfigNotFound(path) => {
                format!(
                    "Configuration file not found: {}\n\n\
                    💡 Quick fix:\n\
                    1. Run: trading-feed init\n\
                    2. Edit config.toml if needed\n\
                    3. Try again",
                    path
                )
            }
            FeedError::ConfigValidation(msg) => {
                format!(
                    "Configuration validation error: {}\n\n\
                    💡 Check config.toml for:\n\
                    - Positive interval and floor values\n\
                    - An http(s) backend URL",
                    msg
                )
            }
            FeedError::Api(ApiError::Authorization { detail }) => {
                format!(
                    "Backend refused the request: {}\n\n\
                    💡 Check the backend token in config.toml",
                    detail
                )
            }
            FeedError::Api(ApiError::Network(msg)) | FeedError::Api(ApiError::Timeout(msg)) => {
                format!(
                    "Backend unreachable: {}\n\n\
                    💡 Try:\n\
                    1. Check backend.base_url\n\
                    2. Make sure the backend is running\n\
                    3. Run without the backend: trading-feed run",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }

    /// Check if the next poll may succeed without intervention
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Api(err) => err.is_transient(),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            FeedError::ConfigNotFound(_)
            | FeedError::ConfigParse(_)
            | FeedError::ConfigValidation(_) => "config",

            FeedError::Api(ApiError::Network(_)) | FeedError::Api(ApiError::Timeout(_)) => "network",
            FeedError::Api(ApiError::Validation { .. }) => "validation",
            FeedError::Api(ApiError::Authorization { .. }) => "authorization",
            FeedError::Api(_) => "api",

            FeedError::FileRead(_) | FeedError::FileWrite(_) => "io",

            FeedError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path)
            }
            FeedError::ConfigParse(msg) => {
                write!(f, "Configuration parse error: {}", msg)
            }
            FeedError::ConfigValidation(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
            FeedError::Api(err) => {
                write!(f, "Backend error: {}", err)
            }
            FeedError::FileRead(msg) => {
                write!(f, "File read error: {}", msg)
            }
            FeedError::FileWrite(msg) => {
                write!(f, "File write error: {}", msg)
            }
            FeedError::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FeedError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FeedError::FileRead(err.to_string()),
            _ => FeedError::Internal(format!("IO error: {}", err)),
        }
    }
}

impl From<ApiError> for FeedError {
    fn from(err: ApiError) -> Self {
        FeedError::Api(err)
    }
}

impl From<ConfigError> for FeedError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileNotFound(path) => FeedError::ConfigNotFound(path),
            ConfigError::FileRead(msg) => FeedError::FileRead(msg),
            ConfigError::FileWrite(msg) => FeedError::FileWrite(msg),
            ConfigError::Parse(msg) => FeedError::ConfigParse(msg),
            ConfigError::Serialize(msg) => FeedError::Internal(msg),
            ConfigError::Validation(msg) => FeedError::ConfigValidation(msg),
        }
    }
}

impl From<toml::de::Error> for FeedError {
    fn from(err: toml::de::Error) -> Self {
        FeedError::ConfigParse(format!("TOML parse error: {}", err))
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Internal(format!("JSON error: {}", err))
    }
}

impl From<String> for FeedError {
    fn from(msg: String) -> Self {
        FeedError::Internal(msg)
    }
}

impl From<&str> for FeedError {
    fn from(msg: &str) -> Self {
        FeedError::Internal(msg.to_string())
    }
}

/// Result type alias using FeedError
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::ConfigNotFound("config.toml".to_string());
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_error_category() {
        let err = FeedError::ConfigValidation("test".to_string());
        assert_eq!(err.category(), "config");

        let err = FeedError::Api(ApiError::Timeout("slow".to_string()));
        assert_eq!(err.category(), "network");

        let err = FeedError::Api(ApiError::Authorization { detail: "no".to_string() });
        assert_eq!(err.category(), "authorization");

        let err = FeedError::Api(ApiError::Validation { detail: "bad".to_string() });
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn test_retryable() {
        let err = FeedError::Api(ApiError::Network("refused".to_string()));
        assert!(err.is_retryable());

        let err = FeedError::Api(ApiError::Authorization { detail: "expired".to_string() });
        assert!(!err.is_retryable());

        let err = FeedError::ConfigNotFound("test".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_user_message() {
        let err = FeedError::Api(ApiError::Network("connection refused".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("💡"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: FeedError = ConfigError::Validation("interval_ms".to_string()).into();
        assert!(matches!(err, FeedError::ConfigValidation(_)));
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FeedError = json_err.into();
        assert!(matches!(err, FeedError::Internal(_)));
        assert!(err.to_string().contains("JSON error"));
        assert_eq!(err.category(), "internal");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: FeedError = io_err.into();
        assert!(matches!(err, FeedError::FileRead(_)));
    }
}
