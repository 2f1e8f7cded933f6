//! Error types for the Noor HTTP clients.

use noor_core::ResolveError;
use thiserror::Error;

/// Errors that can occur when talking to the query API or the recitation service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,
}

impl ClientError {
    /// Classify a transport failure
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<ClientError> for ResolveError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(what) => ResolveError::NotFound(what),
            ClientError::Timeout => ResolveError::Timeout,
            ClientError::Request(e) if e.is_timeout() => ResolveError::Timeout,
            other => ResolveError::Network(other.to_string()),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
