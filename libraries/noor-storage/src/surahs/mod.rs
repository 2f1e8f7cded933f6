use crate::error::{Result, StorageError};
use noor_core::types::{Ayah, ReadingEntry, Surah, SurahDetail};
use sqlx::SqlitePool;

const SURAH_COLUMNS: &str = "surah_id, surah_number, name_english, name_arabic, name_gujarati,
    name_meaning, english_meaning, total_ayahs, revelation_order, surah_total_ruku,
    parah_info, short_intro, first_page";

/// All surahs in mushaf order
pub async fn all(pool: &SqlitePool) -> Result<Vec<Surah>> {
    let sql = format!("SELECT {SURAH_COLUMNS} FROM surahs ORDER BY surah_number");
    let surahs = sqlx::query_as::<_, Surah>(&sql).fetch_all(pool).await?;
    Ok(surahs)
}

pub async fn get_by_id(pool: &SqlitePool, surah_id: i64) -> Result<Option<Surah>> {
    let sql = format!("SELECT {SURAH_COLUMNS} FROM surahs WHERE surah_id = ?");
    let surah = sqlx::query_as::<_, Surah>(&sql)
        .bind(surah_id)
        .fetch_optional(pool)
        .await?;
    Ok(surah)
}

/// Compact index used by the reading view
pub async fn reading_index(pool: &SqlitePool) -> Result<Vec<ReadingEntry>> {
    let entries = sqlx::query_as::<_, ReadingEntry>(
        "SELECT surah_id, surah_number, name_english AS surah_name
         FROM surahs
         ORDER BY surah_number",
    )
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// A surah with every verse, its translations and tafsir
///
/// Verses without a translations row still appear, with empty translation
/// fields.
pub async fn detail(pool: &SqlitePool, surah_id: i64) -> Result<SurahDetail> {
    let surah = get_by_id(pool, surah_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Surah", surah_id.to_string()))?;

    let ayahs = sqlx::query_as::<_, Ayah>(
        "SELECT
             a.ayah_id,
             a.ayah_number,
             a.arabic_text,
             a.parah_number,
             a.sajda_word,
             t.translation_gujarati,
             t.translation_english,
             t.translation_urdu,
             t.translation_hindi,
             t.translation_as_kalam_roman,
             t.tafsir_gujarati,
             t.tafsir_english,
             t.tafsir_urdu,
             t.tafsir_hindi,
             t.tafsir_as_kalam_roman
         FROM ayahs a
         LEFT JOIN translations t ON a.ayah_id = t.ayah_id
         WHERE a.surah_id = ?
         ORDER BY a.ayah_number",
    )
    .bind(surah_id)
    .fetch_all(pool)
    .await?;

    Ok(SurahDetail { surah, ayahs })
}
