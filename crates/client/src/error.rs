//! Error types for the Ariel client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Ariel client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No usable SEC token could be acquired.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The search service rejected or failed a search.
    ///
    /// Covers rejected submissions, non-success status/result responses,
    /// searches that reached `CANCELED`/`ERROR`, and searches that did not
    /// finish within the caller's timeout.
    #[error("{message}")]
    Search {
        /// AQL expression the failing lifecycle was started with, when known.
        expression: Option<String>,
        /// Search handle, once the service has assigned one.
        handle: Option<String>,
        message: String,
    },

    /// Caller asked for a result range that cannot exist.
    #[error("Invalid range; the results are indexed starting at zero (start={start}, end={end})")]
    InvalidRange { start: i64, end: i64 },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A success response did not carry the expected body.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client settings that cannot be used, such as a zero poll interval.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_))
    }

    /// Check if this error came from the search service or the search lifecycle.
    pub fn is_search_error(&self) -> bool {
        matches!(self, Self::Search { .. })
    }

    /// Check if this error was caused by invalid caller input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }

    /// The search handle attached to a [`ClientError::Search`], if any.
    pub fn search_handle(&self) -> Option<&str> {
        match self {
            Self::Search { handle, .. } => handle.as_deref(),
            _ => None,
        }
    }

    /// The AQL expression attached to a [`ClientError::Search`], if any.
    pub fn search_expression(&self) -> Option<&str> {
        match self {
            Self::Search { expression, .. } => expression.as_deref(),
            _ => None,
        }
    }
}
