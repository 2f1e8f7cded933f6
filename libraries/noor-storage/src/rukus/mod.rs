use crate::error::{Result, StorageError};
use noor_core::types::{RukuAyah, RukuDetail, RukuMetadata, RukuRange};
use sqlx::SqlitePool;

/// Ruku boundaries of a surah as `S:first`/`S:last` verse keys
pub async fn for_surah(pool: &SqlitePool, surah_id: i64) -> Result<Vec<RukuRange>> {
    let rukus = sqlx::query_as::<_, RukuRange>(
        "SELECT
             ruku_number,
             surah_id || ':' || MIN(ayah_number) AS start_ayah,
             surah_id || ':' || MAX(ayah_number) AS end_ayah
         FROM ayahs
         WHERE surah_id = ? AND ruku_number IS NOT NULL
         GROUP BY ruku_number, surah_id
         ORDER BY ruku_number",
    )
    .bind(surah_id)
    .fetch_all(pool)
    .await?;
    Ok(rukus)
}

#[derive(sqlx::FromRow)]
struct RukuRow {
    arabic_text: String,
    ayah_id: String,
    ayah_number: i64,
    surah_number: i64,
    surah_name_english: String,
}

/// Verses of one ruku, the last one flagged
pub async fn detail(pool: &SqlitePool, surah_id: i64, ruku_number: i64) -> Result<RukuDetail> {
    let rows = sqlx::query_as::<_, RukuRow>(
        "SELECT
             a.arabic_text,
             a.ayah_id,
             a.ayah_number,
             a.surah_id AS surah_number,
             s.name_english AS surah_name_english
         FROM ayahs a
         JOIN surahs s ON a.surah_id = s.surah_id
         WHERE a.ruku_number = ? AND a.surah_id = ?
         ORDER BY a.ayah_number ASC",
    )
    .bind(ruku_number)
    .bind(surah_id)
    .fetch_all(pool)
    .await?;

    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(StorageError::not_found(
            "Ruku",
            format!("{}:{}", surah_id, ruku_number),
        ));
    };
    let start_ayah = first.ayah_number;
    let end_ayah = last.ayah_number;
    let last_index = rows.len() - 1;

    let ayahs = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| RukuAyah {
            arabic_text: row.arabic_text,
            ayah_id: row.ayah_id,
            ayah_number: row.ayah_number,
            surah_number: row.surah_number,
            surah_name_english: row.surah_name_english,
            ruku_start_ayah: start_ayah,
            ruku_end_ayah: end_ayah,
            is_last_in_ruku: index == last_index,
        })
        .collect();

    Ok(RukuDetail {
        ruku_metadata: RukuMetadata {
            ruku_number,
            surah_id,
            start_ayah,
            end_ayah,
        },
        ayahs,
    })
}
