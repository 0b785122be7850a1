//! Lookup error types.

use thiserror::Error;

/// Why a user lookup produced no candidate list.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Connect failure, timeout, or a body that could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; `message` is an excerpt of the response body.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The body was not a JSON array of candidates.
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}
