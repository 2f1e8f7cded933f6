use crate::error::Result;
use noor_core::types::AyahSummary;
use sqlx::SqlitePool;

/// Arabic text of every verse in a surah, in order
pub async fn by_surah(pool: &SqlitePool, surah_number: i64) -> Result<Vec<AyahSummary>> {
    let ayahs = sqlx::query_as::<_, AyahSummary>(
        "SELECT ayah_number, arabic_text, sajda_word, parah_number
         FROM ayahs
         WHERE surah_id = ?
         ORDER BY ayah_number",
    )
    .bind(surah_number)
    .fetch_all(pool)
    .await?;
    Ok(ayahs)
}

/// Arabic text of a single verse
pub async fn arabic_text(pool: &SqlitePool, ayah_id: &str) -> Result<Option<String>> {
    let text = sqlx::query_scalar::<_, String>("SELECT arabic_text FROM ayahs WHERE ayah_id = ?")
        .bind(ayah_id)
        .fetch_optional(pool)
        .await?;
    Ok(text)
}
