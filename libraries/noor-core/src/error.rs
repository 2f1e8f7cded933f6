/// Core error types for Noor
use thiserror::Error;

/// Result type alias using `NoorError`
pub type Result<T> = std::result::Result<T, NoorError>;

/// Core error type for Noor
#[derive(Error, Debug)]
pub enum NoorError {
    /// Verse key is malformed or outside the Quran
    #[error("Invalid verse key: {0}")]
    InvalidVerseKey(String),

    /// Reciter identifier is not a positive integer
    #[error("Invalid reciter id: {0}")]
    InvalidReciter(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl NoorError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for NoorError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
