//! Configuration and wire types for the Noor HTTP clients.

use noor_core::types::{AyahSummary, Parah, ReadingEntry, Sajda, Surah};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Query API served by noor-server
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Public recitation metadata service
pub const DEFAULT_QURAN_API_URL: &str = "https://api.quran.com/api/v4";

/// Host that relative verse audio paths are resolved against
pub const DEFAULT_MEDIA_HOST: &str = "https://verses.quran.com/";

/// Recitation ids that are never offered to the reader
pub const HIDDEN_RECITATIONS: [u32; 4] = [9, 10, 11, 12];

/// Where the clients connect and how long they wait.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the query API (e.g., "http://localhost:3001/api")
    pub api_url: String,
    /// Base URL of the recitation service
    pub quran_api_url: String,
    /// Prefix for relative audio file paths
    pub media_host: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default config pointed at a different query API.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            quran_api_url: DEFAULT_QURAN_API_URL.to_string(),
            media_host: DEFAULT_MEDIA_HOST.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// Recitation Service Types
// =============================================================================

/// Response of `recitations/{id}/by_ayah/{verse}`.
#[derive(Debug, Deserialize)]
pub struct VerseAudioResponse {
    #[serde(default)]
    pub audio_files: Vec<VerseAudioFile>,
}

#[derive(Debug, Deserialize)]
pub struct VerseAudioFile {
    pub url: String,
}

/// Response of `chapter_recitations/{id}/{surah}`.
#[derive(Debug, Deserialize)]
pub struct ChapterAudioResponse {
    pub audio_file: Option<ChapterAudioFile>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterAudioFile {
    pub audio_url: Option<String>,
}

/// A reciter and recording style offered by the recitation service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recitation {
    pub id: u32,
    pub reciter_name: String,
    pub style: Option<String>,
}

impl Recitation {
    /// Name shown in the reciter picker, e.g. "Mishari Rashid al-`Afasy - Murattal"
    pub fn label(&self) -> String {
        match &self.style {
            Some(style) => format!("{} - {}", self.reciter_name, style),
            None => self.reciter_name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecitationsResponse {
    pub recitations: Vec<Recitation>,
}

// =============================================================================
// Query API Envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct SurahsEnvelope {
    pub surahs: Vec<Surah>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AyahsEnvelope {
    pub ayahs: Vec<AyahSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReadingEnvelope {
    pub reading: Vec<ReadingEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SajdasEnvelope {
    pub sajdas: Vec<Sajda>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParahsEnvelope {
    pub parahs: Vec<Parah>,
}

/// Error body returned by the query API.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
