//! Query API consumers.
//!
//! Failures are returned to the caller as they are; nothing here retries.

use crate::client::get_json;
use crate::error::Result;
use crate::types::{AyahsEnvelope, ParahsEnvelope, ReadingEnvelope, SajdasEnvelope, SurahsEnvelope};
use noor_core::types::{
    AyahSummary, PageLine, Parah, ReadingEntry, RukuDetail, RukuRange, Sajda, SearchHit, Surah,
    SurahDetail,
};
use reqwest::Client;
use tracing::debug;

/// Client for the content endpoints of noor-server.
pub struct ReaderClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> ReaderClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// All surahs in order.
    pub async fn surahs(&self) -> Result<Vec<Surah>> {
        let url = self.url("/surahs");
        debug!(url = %url, "Fetching surahs");

        let envelope: SurahsEnvelope = get_json(self.http.get(&url), "surahs").await?;
        Ok(envelope.surahs)
    }

    /// A surah with its verses, translations and tafsir.
    pub async fn surah(&self, surah_id: u8) -> Result<SurahDetail> {
        let url = self.url(&format!("/surah/{}", surah_id));
        debug!(url = %url, "Fetching surah");

        get_json(self.http.get(&url), &format!("surah {}", surah_id)).await
    }

    /// Arabic text of a surah's verses.
    pub async fn ayahs(&self, surah_number: u8) -> Result<Vec<AyahSummary>> {
        let url = self.url(&format!("/ayahs/{}", surah_number));
        debug!(url = %url, "Fetching ayahs");

        let envelope: AyahsEnvelope =
            get_json(self.http.get(&url), &format!("ayahs of surah {}", surah_number)).await?;
        Ok(envelope.ayahs)
    }

    /// Reading index.
    pub async fn reading(&self) -> Result<Vec<ReadingEntry>> {
        let url = self.url("/reading");
        debug!(url = %url, "Fetching reading index");

        let envelope: ReadingEnvelope = get_json(self.http.get(&url), "reading index").await?;
        Ok(envelope.reading)
    }

    /// Ruku ranges of a surah.
    pub async fn surah_rukus(&self, surah_id: u8) -> Result<Vec<RukuRange>> {
        let url = self.url("/surah-rukus");
        debug!(url = %url, surah = surah_id, "Fetching surah rukus");

        let request = self.http.get(&url).query(&[("surah", surah_id)]);
        get_json(request, &format!("rukus of surah {}", surah_id)).await
    }

    /// Verses of one ruku.
    pub async fn ruku(&self, surah_id: u8, ruku_number: u32) -> Result<RukuDetail> {
        let url = self.url("/ruku");
        debug!(url = %url, surah = surah_id, ruku = ruku_number, "Fetching ruku");

        let request = self
            .http
            .get(&url)
            .query(&[("surah", u32::from(surah_id)), ("ruku", ruku_number)]);
        get_json(request, &format!("ruku {} of surah {}", ruku_number, surah_id)).await
    }

    /// Verses carrying a prostration.
    pub async fn sajdas(&self) -> Result<Vec<Sajda>> {
        let url = self.url("/sajdas");
        debug!(url = %url, "Fetching sajdas");

        let envelope: SajdasEnvelope = get_json(self.http.get(&url), "sajdas").await?;
        Ok(envelope.sajdas)
    }

    /// Parah start verses.
    pub async fn parahs(&self) -> Result<Vec<Parah>> {
        let url = self.url("/parahs");
        debug!(url = %url, "Fetching parahs");

        let envelope: ParahsEnvelope = get_json(self.http.get(&url), "parahs").await?;
        Ok(envelope.parahs)
    }

    /// Lines of a mushaf page.
    pub async fn page(&self, page_number: u32) -> Result<Vec<PageLine>> {
        let url = self.url("/pages");
        debug!(url = %url, page = page_number, "Fetching page");

        let request = self.http.get(&url).query(&[("page", page_number)]);
        get_json(request, &format!("page {}", page_number)).await
    }

    /// Search verses, translations and tafsir.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = self.url("/search");
        debug!(url = %url, query = %query, "Searching");

        let request = self.http.get(&url).query(&[("query", query)]);
        let hits: Vec<SearchHit> = get_json(request, "search results").await?;

        debug!(count = hits.len(), "Search returned");
        Ok(hits)
    }
}
