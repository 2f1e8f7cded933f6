/// Core traits for Noor
use crate::types::{ReciterId, VerseKey};
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Why an audio URL could not be resolved
///
/// Every variant is non-fatal: callers log it and leave the verse playable
/// so the reader can retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The recitation service has no audio for this verse or surah
    #[error("No audio found for {0}")]
    NotFound(String),

    /// Transport failure or unexpected response
    #[error("Network failure: {0}")]
    Network(String),

    /// The request did not complete within the allowed time
    #[error("Audio resolution timed out")]
    Timeout,
}

/// Remote audio resource resolver
///
/// Turns a reciter and a verse (or a whole surah) into a playable media URL.
/// Implementations issue one outbound request per call and cache nothing;
/// caching belongs to the preload layer.
///
/// Cancellation is by drop: a caller that loses interest drops the future,
/// which abandons the in-flight request and discards its result.
#[async_trait]
pub trait AudioResolver: Send + Sync {
    /// Resolve the audio URL of a single verse
    async fn resolve_verse(&self, reciter: ReciterId, verse: VerseKey)
        -> Result<Url, ResolveError>;

    /// Resolve the audio URL of a full-surah recitation
    async fn resolve_chapter(&self, reciter: ReciterId, surah: u8) -> Result<Url, ResolveError>;
}
