//! Main Noor HTTP client.

use crate::error::{ClientError, Result};
use crate::reader::ReaderClient;
use crate::recitation::RecitationClient;
use crate::types::{ClientConfig, ErrorBody};
use async_trait::async_trait;
use noor_core::{AudioResolver, ReciterId, ResolveError, VerseKey};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the Noor query API and the recitation service.
///
/// One HTTP connection pool is shared by every sub-client; cloning the
/// client is cheap and shares it too.
///
/// # Example
///
/// ```no_run
/// use noor_client::{ClientConfig, NoorClient};
/// use noor_core::{ReciterId, VerseKey};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = NoorClient::new(ClientConfig::default())?;
///
/// let surahs = client.reader().surahs().await?;
/// println!("Found {} surahs", surahs.len());
///
/// let verse: VerseKey = "2:255".parse()?;
/// let url = client.recitations().verse_audio(ReciterId::DEFAULT, verse).await?;
/// println!("Audio at {}", url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NoorClient {
    http: Client,
    config: ClientConfig,
    media_host: Url,
}

impl NoorClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_url = normalize_base_url(&config.api_url)?;
        let quran_api_url = normalize_base_url(&config.quran_api_url)?;

        // Url::join needs the trailing slash to keep the host's path
        let media_host = format!("{}/", normalize_base_url(&config.media_host)?);
        let media_host =
            Url::parse(&media_host).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(10)))
            .user_agent(format!("Noor/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: ClientConfig {
                api_url,
                quran_api_url,
                media_host: media_host.to_string(),
                timeout: config.timeout,
            },
            media_host,
        })
    }

    /// Get the query API base URL.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Get the recitation service base URL.
    pub fn quran_api_url(&self) -> &str {
        &self.config.quran_api_url
    }

    /// Client for the query API.
    pub fn reader(&self) -> ReaderClient<'_> {
        ReaderClient::new(&self.http, &self.config.api_url)
    }

    /// Client for the recitation service.
    pub fn recitations(&self) -> RecitationClient<'_> {
        RecitationClient::new(&self.http, &self.config.quran_api_url, &self.media_host)
    }
}

#[async_trait]
impl AudioResolver for NoorClient {
    async fn resolve_verse(
        &self,
        reciter: ReciterId,
        verse: VerseKey,
    ) -> std::result::Result<Url, ResolveError> {
        Ok(self.recitations().verse_audio(reciter, verse).await?)
    }

    async fn resolve_chapter(
        &self,
        reciter: ReciterId,
        surah: u8,
    ) -> std::result::Result<Url, ResolveError> {
        Ok(self.recitations().chapter_audio(reciter, surah).await?)
    }
}

/// Validate a base URL and strip trailing slashes.
fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    Ok(url)
}

/// Send a GET request and decode its JSON body.
///
/// 404 maps to `NotFound`, any other non-2xx status to `ServerError`
/// carrying the server's `{error}` message when there is one.
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
    let response = request.send().await.map_err(ClientError::from_send)?;
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)));
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);

    debug!(status = status.as_u16(), what = %what, message = %message, "Request failed");

    if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(what.to_string()))
    } else {
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(NoorClient::new(ClientConfig::new("https://example.com/api")).is_ok());
        assert!(NoorClient::new(ClientConfig::new("http://localhost:3001/api")).is_ok());

        // Invalid URLs
        assert!(NoorClient::new(ClientConfig::new("")).is_err());
        assert!(NoorClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(NoorClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let config = ClientConfig {
            api_url: "https://example.com/api/".into(),
            quran_api_url: "https://quran.example.com/v4//".into(),
            media_host: "https://media.example.com".into(),
            ..ClientConfig::default()
        };
        let client = NoorClient::new(config).expect("valid urls");

        assert_eq!(client.api_url(), "https://example.com/api");
        assert_eq!(client.quran_api_url(), "https://quran.example.com/v4");
        assert_eq!(client.media_host.as_str(), "https://media.example.com/");
    }
}
