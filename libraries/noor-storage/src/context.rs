use crate::error::Result;
use crate::{ayahs, pages, parahs, preferences, rukus, sajdas, search, surahs};
use noor_core::types::{
    AyahSummary, Bookmarks, PageLine, Parah, ReaderSettings, ReadingEntry, ReadingProgress,
    RukuDetail, RukuRange, Sajda, SearchHit, Surah, SurahDetail,
};
use sqlx::SqlitePool;

/// Read access to the Quran content database plus the preference store
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct QuranStore {
    pool: SqlitePool,
}

impl QuranStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to check the database is reachable
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // Content

    pub async fn surahs(&self) -> Result<Vec<Surah>> {
        surahs::all(&self.pool).await
    }

    pub async fn surah_detail(&self, surah_id: i64) -> Result<SurahDetail> {
        surahs::detail(&self.pool, surah_id).await
    }

    pub async fn reading_index(&self) -> Result<Vec<ReadingEntry>> {
        surahs::reading_index(&self.pool).await
    }

    pub async fn ayahs(&self, surah_number: i64) -> Result<Vec<AyahSummary>> {
        ayahs::by_surah(&self.pool, surah_number).await
    }

    pub async fn surah_rukus(&self, surah_id: i64) -> Result<Vec<RukuRange>> {
        rukus::for_surah(&self.pool, surah_id).await
    }

    pub async fn ruku(&self, surah_id: i64, ruku_number: i64) -> Result<RukuDetail> {
        rukus::detail(&self.pool, surah_id, ruku_number).await
    }

    pub async fn sajdas(&self) -> Result<Vec<Sajda>> {
        sajdas::all(&self.pool).await
    }

    pub async fn parahs(&self) -> Result<Vec<Parah>> {
        parahs::all(&self.pool).await
    }

    pub async fn page(&self, page_number: i64) -> Result<Vec<PageLine>> {
        pages::lines(&self.pool, page_number).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        search::search(&self.pool, query).await
    }

    // Reader state

    pub async fn bookmarks(&self) -> Result<Bookmarks> {
        preferences::load_bookmarks(&self.pool).await
    }

    pub async fn save_bookmarks(&self, bookmarks: &Bookmarks) -> Result<()> {
        preferences::save_bookmarks(&self.pool, bookmarks).await
    }

    pub async fn reading_progress(&self) -> Result<ReadingProgress> {
        preferences::load_reading_progress(&self.pool).await
    }

    pub async fn save_reading_progress(&self, progress: &ReadingProgress) -> Result<()> {
        preferences::save_reading_progress(&self.pool, progress).await
    }

    pub async fn settings(&self) -> Result<ReaderSettings> {
        preferences::load_settings(&self.pool).await
    }

    pub async fn save_settings(&self, settings: &ReaderSettings) -> Result<()> {
        preferences::save_settings(&self.pool, settings).await
    }
}
