// Feed failure kind

use reqwest::StatusCode;

/// Why a poll cycle produced nothing to render.
///
/// Every cause is handled the same way: log, keep the previous render, try
/// again on the next tick. The variants only exist so the log line says what
/// went wrong.
#[derive(Debug, thiserror::Error)]
pub enum FeedUnavailable {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}
