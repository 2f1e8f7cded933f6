use crate::error::Result;
use noor_core::types::PageLine;
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashMap};

/// Text drawn on basmallah lines
pub const BASMALLAH: &str = "\u{FDFD}";

#[derive(sqlx::FromRow)]
struct LineRow {
    line_number: i64,
    line_type: String,
    is_centered: bool,
    surah_number: Option<i64>,
    first_word_id: Option<i64>,
    last_word_id: Option<i64>,
}

/// Lines of a mushaf page with their text filled in
///
/// Verse lines join the page's word range with single spaces, surah
/// headers carry the surah's Arabic name. Words and names for the whole
/// page are read in one query each.
pub async fn lines(pool: &SqlitePool, page_number: i64) -> Result<Vec<PageLine>> {
    let rows = sqlx::query_as::<_, LineRow>(
        "SELECT line_number, line_type, is_centered, surah_number, first_word_id, last_word_id
         FROM pages
         WHERE page_number = ?
         ORDER BY line_number",
    )
    .bind(page_number)
    .fetch_all(pool)
    .await?;

    let words = page_words(pool, &rows).await?;
    let names = header_names(pool, &rows).await?;

    let lines = rows
        .into_iter()
        .map(|row| {
            let line_text = match row.line_type.as_str() {
                "ayah" => match (row.first_word_id, row.last_word_id) {
                    (Some(first), Some(last)) if first <= last => Some(
                        words
                            .range(first..=last)
                            .map(|(_, text)| text.as_str())
                            .collect::<Vec<_>>()
                            .join(" "),
                    ),
                    (Some(_), Some(_)) => Some(String::new()),
                    _ => None,
                },
                "surah_name" => row
                    .surah_number
                    .and_then(|number| names.get(&number).cloned()),
                "basmallah" => Some(BASMALLAH.to_string()),
                _ => None,
            };

            PageLine {
                line_number: row.line_number,
                line_type: row.line_type,
                is_centered: row.is_centered,
                surah_number: row.surah_number,
                line_text,
            }
        })
        .collect();

    Ok(lines)
}

/// Every word from the page's first verse line to its last, by index
async fn page_words(pool: &SqlitePool, rows: &[LineRow]) -> Result<BTreeMap<i64, String>> {
    let ranges = rows
        .iter()
        .filter(|row| row.line_type == "ayah")
        .filter_map(|row| row.first_word_id.zip(row.last_word_id));
    let Some((first, last)) = ranges.fold(None, |span: Option<(i64, i64)>, (lo, hi)| {
        Some(span.map_or((lo, hi), |(a, b)| (a.min(lo), b.max(hi))))
    }) else {
        return Ok(BTreeMap::new());
    };

    let words = sqlx::query_as::<_, (i64, String)>(
        "SELECT word_index, text FROM words WHERE word_index BETWEEN ? AND ?",
    )
    .bind(first)
    .bind(last)
    .fetch_all(pool)
    .await?;
    Ok(words.into_iter().collect())
}

/// Arabic names of the surahs whose headers appear on the page
async fn header_names(pool: &SqlitePool, rows: &[LineRow]) -> Result<HashMap<i64, String>> {
    let numbers: Vec<i64> = rows
        .iter()
        .filter(|row| row.line_type == "surah_name")
        .filter_map(|row| row.surah_number)
        .collect();
    let (Some(&first), Some(&last)) = (numbers.iter().min(), numbers.iter().max()) else {
        return Ok(HashMap::new());
    };

    let names = sqlx::query_as::<_, (i64, Option<String>)>(
        "SELECT surah_number, name_arabic FROM surahs WHERE surah_number BETWEEN ? AND ?",
    )
    .bind(first)
    .bind(last)
    .fetch_all(pool)
    .await?;
    Ok(names
        .into_iter()
        .filter_map(|(number, name)| Some((number, name?)))
        .collect())
}
