//! Error types for the Go.Data API layer.

use thiserror::Error;

/// Errors raised while talking to the registry.
///
/// `OutbreakNotFound` and `LoginFailed` are fatal configuration problems
/// surfaced before any upload; `Transport`/`Status` during an upsert are
/// captured into that case's outcome and never abort the batch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Network request failed.
    #[error("network error: {0}")]
    Transport(String),

    /// The registry answered with a non-success status.
    #[error("registry returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Credentials were rejected or the login response had no token.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// No outbreak with the requested name exists in the registry.
    #[error("outbreak not found: {0:?}")]
    OutbreakNotFound(String),

    /// Response body did not match the expected shape.
    #[error("invalid response payload: {0}")]
    Json(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
