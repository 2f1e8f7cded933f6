/// Quran content rows as served by the query API
///
/// Field names match the JSON the reader consumes, which are also the
/// column names of the content database.
use serde::{Deserialize, Serialize};

/// Surah (chapter) metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Surah {
    pub surah_id: i64,
    pub surah_number: i64,
    pub name_english: String,
    pub name_arabic: Option<String>,
    pub name_gujarati: Option<String>,
    pub name_meaning: Option<String>,
    pub english_meaning: Option<String>,
    pub total_ayahs: i64,
    pub revelation_order: Option<String>,
    pub surah_total_ruku: Option<i64>,
    pub parah_info: Option<String>,
    pub short_intro: Option<String>,
    pub first_page: Option<i64>,
}

/// Verse with its translations and tafsir
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Ayah {
    pub ayah_id: String,
    pub ayah_number: i64,
    pub arabic_text: String,
    pub parah_number: Option<i64>,
    pub sajda_word: Option<String>,
    pub translation_gujarati: Option<String>,
    pub translation_english: Option<String>,
    pub translation_urdu: Option<String>,
    pub translation_hindi: Option<String>,
    pub translation_as_kalam_roman: Option<String>,
    pub tafsir_gujarati: Option<String>,
    pub tafsir_english: Option<String>,
    pub tafsir_urdu: Option<String>,
    pub tafsir_hindi: Option<String>,
    pub tafsir_as_kalam_roman: Option<String>,
}

/// A surah together with all of its verses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahDetail {
    pub surah: Surah,
    pub ayahs: Vec<Ayah>,
}

/// Verse without translations, used for plain Arabic reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct AyahSummary {
    pub ayah_number: i64,
    pub arabic_text: String,
    pub sajda_word: Option<String>,
    pub parah_number: Option<i64>,
}

/// Entry of the reading index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct ReadingEntry {
    pub surah_id: i64,
    pub surah_number: i64,
    pub surah_name: String,
}

/// Verse that carries a prostration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Sajda {
    /// Verse key (`S:A`)
    pub id: String,
    /// Arabic text of the verse
    pub verse: String,
}

/// Start of one of the 30 parahs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Parah {
    pub parah_number: i64,
    pub ayah_id: String,
    pub arabic_text: String,
}

/// Verse range of a ruku within a surah
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct RukuRange {
    pub ruku_number: i64,
    /// First verse key (`S:A`)
    pub start_ayah: String,
    /// Last verse key (`S:A`)
    pub end_ayah: String,
}

/// Verse of a ruku, carrying the ruku's bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct RukuAyah {
    pub arabic_text: String,
    pub ayah_id: String,
    pub ayah_number: i64,
    pub surah_number: i64,
    pub surah_name_english: String,
    pub ruku_start_ayah: i64,
    pub ruku_end_ayah: i64,
    /// Set on the final verse so readers can draw a separator
    #[serde(rename = "isLastInRuku", default)]
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub is_last_in_ruku: bool,
}

/// Identity and bounds of a ruku
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RukuMetadata {
    pub ruku_number: i64,
    pub surah_id: i64,
    pub start_ayah: i64,
    pub end_ayah: i64,
}

/// A ruku with its verses in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RukuDetail {
    pub ruku_metadata: RukuMetadata,
    pub ayahs: Vec<RukuAyah>,
}

/// One line of a printed mushaf page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct PageLine {
    pub line_number: i64,
    /// `ayah`, `surah_name` or `basmallah`
    pub line_type: String,
    pub is_centered: bool,
    pub surah_number: Option<i64>,
    pub line_text: Option<String>,
}

/// Verse matched by a text search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct SearchHit {
    pub ayah_id: String,
    pub surah_id: i64,
    pub ayah_number: i64,
    pub arabic_text: String,
    pub sajda_word: Option<String>,
    pub surah_name: Option<String>,
    pub surah_name_gujarati: Option<String>,
    pub surah_number: Option<i64>,
    pub translation_gujarati: Option<String>,
    pub translation_english: Option<String>,
    pub translation_urdu: Option<String>,
    pub tafsir_gujarati: Option<String>,
    pub tafsir_english: Option<String>,
    pub tafsir_urdu: Option<String>,
}

impl SearchHit {
    /// Text fields a search query is matched against
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(Some(self.arabic_text.as_str()))
            .chain([
                self.translation_english.as_deref(),
                self.translation_gujarati.as_deref(),
                self.translation_urdu.as_deref(),
                self.tafsir_english.as_deref(),
                self.tafsir_gujarati.as_deref(),
                self.tafsir_urdu.as_deref(),
                self.surah_name.as_deref(),
                self.surah_name_gujarati.as_deref(),
            ])
            .flatten()
    }
}
