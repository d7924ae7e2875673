//! Error types for outbound requests and response rendering

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single outbound fetch
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response: connect failure, timeout, broken body
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-2xx status
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: StatusCode },

    /// The body was not the JSON we asked for
    #[error("invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// URL of the failed request
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Parse { url, .. } => url,
        }
    }

    /// Whether the request was abandoned because the timeout elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}

/// Forecast payload that cannot be rendered
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ForecastError {
    #[error("forecast is incomplete: expected {expected} days of {field}, got {got}")]
    Incomplete {
        expected: usize,
        field: &'static str,
        got: usize,
    },
}

/// Result of a single fetch
pub type FetchResult<T> = std::result::Result<T, FetchError>;
