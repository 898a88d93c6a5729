// src/error.rs
use serde::{Deserialize, Serialize};

/// Coarse failure taxonomy shared across adapters and the aggregator.
///
/// The surrounding HTTP layer maps these onto status codes; inside the
/// crate they drive the recover-vs-surface decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    RateLimited,
    Upstream,
    NotFound,
    Malformed,
    InvalidIdentifier,
}

impl ErrorKind {
    /// Precedence when picking the dominant failure of an all-failed
    /// multi-source search: Timeout > RateLimited > Upstream > the rest.
    pub(crate) fn dominance(self) -> u8 {
        match self {
            ErrorKind::Timeout => 5,
            ErrorKind::RateLimited => 4,
            ErrorKind::Upstream => 3,
            ErrorKind::Malformed => 2,
            ErrorKind::NotFound => 1,
            ErrorKind::InvalidIdentifier => 0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MuseumError {
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("rate limited by upstream")]
    RateLimited {
        /// Seconds until a retry is acceptable, when the upstream said so.
        retry_after: Option<u64>,
    },

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("artwork not found")]
    NotFound,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid composite identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl MuseumError {
    /// Collapse the error into the shared taxonomy.
    ///
    /// Transport-level timeouts from reqwest count as `Timeout` even though
    /// they arrive wrapped in `HttpRequest`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MuseumError::Timeout(_) => ErrorKind::Timeout,
            MuseumError::RateLimited { .. } => ErrorKind::RateLimited,
            MuseumError::Upstream(_) => ErrorKind::Upstream,
            MuseumError::NotFound => ErrorKind::NotFound,
            MuseumError::Malformed(_) => ErrorKind::Malformed,
            MuseumError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            MuseumError::HttpRequest(e) if e.is_timeout() => ErrorKind::Timeout,
            MuseumError::HttpRequest(_) => ErrorKind::Upstream,
            MuseumError::SerdeJson(_) => ErrorKind::Malformed,
        }
    }

    pub fn code_str(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Malformed => "malformed_response",
            ErrorKind::InvalidIdentifier => "invalid_identifier",
        }
    }

    /// Retry-after hint, present only on rate-limit failures that carried one.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            MuseumError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}
