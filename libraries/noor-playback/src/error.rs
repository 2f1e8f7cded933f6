//! Error types for recitation playback

use noor_core::{ResolveError, VerseKey};
use thiserror::Error;

/// Playback errors
///
/// Resolution and media failures are non-fatal: the coordinator logs them
/// and folds them into the verse's session state so the reader can retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// No playable unit is mounted for this verse
    #[error("Verse {0} is not mounted")]
    UnknownVerse(VerseKey),

    /// The audio URL could not be resolved
    #[error("Audio resolution failed: {0}")]
    Resolution(#[from] ResolveError),

    /// The media engine refused to open or play the source
    #[error("Media error: {0}")]
    Media(String),

    /// The request was superseded or abandoned before it completed
    #[error("Playback request cancelled")]
    Cancelled,

    /// Verse reference outside the Quran
    #[error("Invalid verse: {0}")]
    InvalidVerse(String),

    /// Surah number outside 1..=114
    #[error("Invalid surah: {0}")]
    InvalidSurah(u8),
}

impl PlaybackError {
    pub fn media(message: impl Into<String>) -> Self {
        PlaybackError::Media(message.into())
    }
}

impl From<noor_core::NoorError> for PlaybackError {
    fn from(err: noor_core::NoorError) -> Self {
        PlaybackError::InvalidVerse(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
