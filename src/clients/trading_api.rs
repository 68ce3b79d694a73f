// REST client for the backend's trading data endpoint

use crate::config::BackendConfig;
use crate::core::types::TradingPair;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const TRADING_DATA_PATH: &str = "/api/trading/data";

/// Body of `GET /api/trading/data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingDataResponse {
    pub pairs: Vec<TradingPair>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// The backend emits naive UTC timestamps; accept those as well as RFC 3339.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// Failure kinds the UI layer distinguishes
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request rejected: {detail}")]
    Validation { detail: String },

    #[error("not authorized: {detail}")]
    Authorization { detail: String },

    #[error("server returned {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success status and the backend's `{"detail": ...}` body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation { detail },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Authorization { detail },
            _ => ApiError::Server { status: status.as_u16(), detail },
        }
    }

    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout(_) => true,
            ApiError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// `detail` may be a plain string or a list of validation entries with `msg`
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct TradingApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl TradingApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(match &config.token {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_trading_data(&self) -> Result<TradingDataResponse, ApiError> {
        let url = format!("{}{}", self.base_url, TRADING_DATA_PATH);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        let data: TradingDataResponse = response.json().await?;

        debug!("📡 Received {} pairs from {}", data.pairs.len(), url);
        Ok(data)
    }
}
