use crate::error::Result;
use noor_core::types::Sajda;
use sqlx::SqlitePool;

/// Verses that carry a prostration, in mushaf order
pub async fn all(pool: &SqlitePool) -> Result<Vec<Sajda>> {
    let sajdas = sqlx::query_as::<_, Sajda>(
        "SELECT ayah_id AS id, arabic_text AS verse
         FROM ayahs
         WHERE sajda_word IS NOT NULL
         ORDER BY surah_id, ayah_number",
    )
    .fetch_all(pool)
    .await?;
    Ok(sajdas)
}
