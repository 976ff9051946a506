//! Error types for remote tool operations.
//!
//! These errors are internal to `parlo-tools`; adapters map them to their
//! own boundary types (`HttpError` in `parlo-axum`, `anyhow` in the CLI).

use thiserror::Error;

/// Result type alias for tool operations.
pub type ToolsResult<T> = Result<T, ToolsError>;

/// Errors related to the remote AI-tool backend.
#[derive(Debug, Error)]
pub enum ToolsError {
    /// The backend reported a failure, either as a 4xx/5xx body or as a
    /// `"success": false` envelope in a 200 response.
    #[error("Tool backend error ({status}): {message}")]
    Backend {
        /// HTTP status code the backend answered with.
        status: u16,
        /// The backend's `error` string.
        message: String,
    },

    /// The request failed with an HTTP error status and no parseable body.
    #[error("Tool request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
