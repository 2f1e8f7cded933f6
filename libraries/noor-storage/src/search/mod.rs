//! Verse search across Arabic text, translations, tafsir and surah names
//!
//! SQLite's `LIKE` only folds ASCII case, so matching happens in Rust on
//! normalized text: rows stream in verse order and the scan stops as soon
//! as enough hits are collected.

use crate::error::Result;
use futures_util::TryStreamExt;
use noor_core::types::SearchHit;
use sqlx::SqlitePool;
use tracing::debug;

/// Maximum number of hits returned for one query
pub const MAX_RESULTS: usize = 50;

/// Fold text for comparison
///
/// Lowercases, drops Arabic harakat, Quranic annotation marks and tatweel,
/// and maps the hamza and wasla forms of alef to a bare alef.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !is_ignorable(*c))
        .map(fold_alef)
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_ignorable(c: char) -> bool {
    matches!(c,
        '\u{064B}'..='\u{065F}' // harakat
        | '\u{0670}'            // superscript alef
        | '\u{06D6}'..='\u{06ED}' // Quranic annotation signs
        | '\u{0640}'            // tatweel
    )
}

fn fold_alef(c: char) -> char {
    match c {
        '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' => '\u{0627}',
        other => other,
    }
}

/// Search verses, returning at most [`MAX_RESULTS`] hits ordered by
/// surah then verse
///
/// A blank query matches nothing.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<SearchHit>> {
    let needle = normalize(query.trim());
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    debug!("Searching verses for {:?}", query);

    let mut rows = sqlx::query_as::<_, SearchHit>(
        "SELECT
             a.ayah_id, a.surah_id, a.ayah_number, a.arabic_text, a.sajda_word,
             s.name_english AS surah_name, s.name_gujarati AS surah_name_gujarati, s.surah_number,
             t.translation_gujarati, t.translation_english, t.translation_urdu,
             t.tafsir_gujarati, t.tafsir_english, t.tafsir_urdu
         FROM ayahs a
         LEFT JOIN translations t ON a.ayah_id = t.ayah_id
         LEFT JOIN surahs s ON a.surah_id = s.surah_id
         ORDER BY a.surah_id, a.ayah_number",
    )
    .fetch(pool);

    let mut hits = Vec::new();
    while let Some(hit) = rows.try_next().await? {
        if hit
            .searchable_fields()
            .any(|field| normalize(field).contains(&needle))
        {
            hits.push(hit);
            if hits.len() == MAX_RESULTS {
                break;
            }
        }
    }

    debug!("Search for {:?} matched {} verses", query, hits.len());
    Ok(hits)
}
