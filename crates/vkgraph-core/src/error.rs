//! Error types for remote fetches.

use thiserror::Error;

/// Failure of a single call against the remote social API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("User not found: {0}")]
    NotFound(String),
}

/// Result type for remote fetches.
pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    /// Create a malformed-response error carrying the raw body.
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::Malformed(raw.into())
    }

    /// Create a not-found error for the given lookup key.
    pub fn not_found(key: impl ToString) -> Self {
        Self::NotFound(key.to_string())
    }

    /// True when the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
