//! Recitation audio lookups.

use crate::client::get_json;
use crate::error::{ClientError, Result};
use crate::types::{ChapterAudioResponse, Recitation, RecitationsResponse, VerseAudioResponse, HIDDEN_RECITATIONS};
use noor_core::{ReciterId, VerseKey};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Client for the recitation service.
///
/// Every call issues exactly one request and caches nothing.
pub struct RecitationClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    media_host: &'a Url,
}

impl<'a> RecitationClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, media_host: &'a Url) -> Self {
        Self {
            http,
            base_url,
            media_host,
        }
    }

    /// Resolve the playable URL of one verse.
    ///
    /// The service answers with a path relative to the media host; absolute
    /// and scheme-relative paths are kept as they are.
    pub async fn verse_audio(&self, reciter: ReciterId, verse: VerseKey) -> Result<Url> {
        let url = format!(
            "{}/recitations/{}/by_ayah/{}",
            self.base_url, reciter, verse
        );
        debug!(url = %url, "Resolving verse audio");

        let what = format!("audio for {} (reciter {})", verse, reciter);
        let response: VerseAudioResponse = get_json(self.http.get(&url), &what).await?;

        let path = response
            .audio_files
            .into_iter()
            .next()
            .map(|file| file.url)
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| ClientError::NotFound(what.clone()))?;

        let resolved = self
            .media_host
            .join(path.trim())
            .map_err(|e| ClientError::ParseError(format!("Bad audio path {:?}: {}", path, e)))?;

        debug!(verse = %verse, url = %resolved, "Resolved verse audio");
        Ok(resolved)
    }

    /// Resolve the full-surah recitation URL.
    pub async fn chapter_audio(&self, reciter: ReciterId, surah: u8) -> Result<Url> {
        let url = format!(
            "{}/chapter_recitations/{}/{}",
            self.base_url, reciter, surah
        );
        debug!(url = %url, "Resolving chapter audio");

        let what = format!("audio for surah {} (reciter {})", surah, reciter);
        let response: ChapterAudioResponse = get_json(self.http.get(&url), &what).await?;

        let audio_url = response
            .audio_file
            .and_then(|file| file.audio_url)
            .ok_or_else(|| ClientError::NotFound(what.clone()))?;

        Url::parse(&audio_url)
            .map_err(|e| ClientError::ParseError(format!("Bad chapter audio URL {:?}: {}", audio_url, e)))
    }

    /// Recitations available to the reader, hidden ones removed.
    pub async fn list(&self) -> Result<Vec<Recitation>> {
        let url = format!("{}/resources/recitations", self.base_url);
        debug!(url = %url, "Fetching recitations");

        let response: RecitationsResponse = get_json(self.http.get(&url), "recitations").await?;

        let recitations: Vec<Recitation> = response
            .recitations
            .into_iter()
            .filter(|r| !HIDDEN_RECITATIONS.contains(&r.id))
            .collect();

        debug!(count = recitations.len(), "Fetched recitations");
        Ok(recitations)
    }
}
