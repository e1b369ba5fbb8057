//! Test error types.

use thiserror::Error;

/// Errors that can occur while building test requests.
#[derive(Debug, Error)]
pub enum TestError {
    /// Request building failed
    #[error("request build error: {0}")]
    RequestBuild(String),

    /// Header name or value is invalid
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Form or query serialization failed
    #[error("form encoding error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),
}
