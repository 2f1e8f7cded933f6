/// Bookmarked verses and mushaf pages
use super::ids::VerseKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Saved bookmarks, persisted as one JSON document
///
/// Timestamps are Unix milliseconds. Unknown surah bookmarks are kept as raw
/// JSON so older documents survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bookmarks {
    #[serde(default)]
    pub surahs: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub ayahs: BTreeMap<String, AyahBookmark>,
    #[serde(default)]
    pub pages: BTreeMap<String, PageBookmark>,
}

/// Bookmark on a single verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AyahBookmark {
    pub surah_id: u8,
    pub ayah_number: u16,
    pub timestamp: i64,
}

/// Bookmark on a mushaf page, with an optional note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBookmark {
    pub page_number: u32,
    pub surah_number: Option<u8>,
    pub parah_number: Option<u8>,
    #[serde(default)]
    pub note: String,
    pub timestamp: i64,
}

/// Ordering for the verse bookmark list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookmarkSort {
    #[default]
    DateNewest,
    DateOldest,
    SurahAsc,
    SurahDesc,
}

impl Bookmarks {
    /// Bookmark a verse, or remove its bookmark if present
    ///
    /// Returns `true` when the verse is bookmarked afterwards.
    pub fn toggle_ayah(&mut self, verse: VerseKey, now: DateTime<Utc>) -> bool {
        let key = verse.to_string();
        if self.ayahs.remove(&key).is_some() {
            return false;
        }

        self.ayahs.insert(
            key,
            AyahBookmark {
                surah_id: verse.surah(),
                ayah_number: verse.ayah(),
                timestamp: now.timestamp_millis(),
            },
        );
        true
    }

    pub fn is_ayah_bookmarked(&self, verse: VerseKey) -> bool {
        self.ayahs.contains_key(&verse.to_string())
    }

    /// Remove a verse bookmark, returning whether one existed
    pub fn remove_ayah(&mut self, verse: VerseKey) -> bool {
        self.ayahs.remove(&verse.to_string()).is_some()
    }

    /// Bookmark a page, replacing any earlier bookmark on it
    pub fn add_page(
        &mut self,
        page_number: u32,
        surah_number: Option<u8>,
        parah_number: Option<u8>,
        note: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.pages.insert(
            page_number.to_string(),
            PageBookmark {
                page_number,
                surah_number,
                parah_number,
                note: note.into(),
                timestamp: now.timestamp_millis(),
            },
        );
    }

    /// Update the note of an existing page bookmark
    pub fn set_page_note(&mut self, page_number: u32, note: impl Into<String>) -> bool {
        match self.pages.get_mut(&page_number.to_string()) {
            Some(bookmark) => {
                bookmark.note = note.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_page(&mut self, page_number: u32) -> bool {
        self.pages.remove(&page_number.to_string()).is_some()
    }

    pub fn is_page_bookmarked(&self, page_number: u32) -> bool {
        self.pages.contains_key(&page_number.to_string())
    }

    /// Remove every bookmark
    pub fn clear(&mut self) {
        self.surahs.clear();
        self.ayahs.clear();
        self.pages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.surahs.is_empty() && self.ayahs.is_empty() && self.pages.is_empty()
    }

    /// Verse bookmarks in the requested order
    ///
    /// Sorting is stable, so verses bookmarked in the same surah keep
    /// their key order under the surah orderings.
    pub fn sorted_ayahs(&self, sort: BookmarkSort) -> Vec<(&str, &AyahBookmark)> {
        let mut entries: Vec<(&str, &AyahBookmark)> =
            self.ayahs.iter().map(|(k, v)| (k.as_str(), v)).collect();

        match sort {
            BookmarkSort::DateNewest => entries.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp)),
            BookmarkSort::DateOldest => entries.sort_by_key(|e| e.1.timestamp),
            BookmarkSort::SurahAsc => entries.sort_by_key(|e| e.1.surah_id),
            BookmarkSort::SurahDesc => entries.sort_by(|a, b| b.1.surah_id.cmp(&a.1.surah_id)),
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn verse(s: &str) -> VerseKey {
        s.parse().unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut bookmarks = Bookmarks::default();
        assert!(bookmarks.toggle_ayah(verse("2:255"), at(1_000)));
        assert!(bookmarks.is_ayah_bookmarked(verse("2:255")));

        let entry = &bookmarks.ayahs["2:255"];
        assert_eq!(entry.surah_id, 2);
        assert_eq!(entry.ayah_number, 255);
        assert_eq!(entry.timestamp, 1_000);

        assert!(!bookmarks.toggle_ayah(verse("2:255"), at(2_000)));
        assert!(!bookmarks.is_ayah_bookmarked(verse("2:255")));
    }

    #[test]
    fn sorts_by_date_and_surah() {
        let mut bookmarks = Bookmarks::default();
        bookmarks.toggle_ayah(verse("36:1"), at(2_000));
        bookmarks.toggle_ayah(verse("2:255"), at(3_000));
        bookmarks.toggle_ayah(verse("112:1"), at(1_000));

        let keys = |sort| -> Vec<String> {
            bookmarks
                .sorted_ayahs(sort)
                .into_iter()
                .map(|(k, _)| k.to_string())
                .collect()
        };

        assert_eq!(keys(BookmarkSort::DateNewest), ["2:255", "36:1", "112:1"]);
        assert_eq!(keys(BookmarkSort::DateOldest), ["112:1", "36:1", "2:255"]);
        assert_eq!(keys(BookmarkSort::SurahAsc), ["2:255", "36:1", "112:1"]);
        assert_eq!(keys(BookmarkSort::SurahDesc), ["112:1", "36:1", "2:255"]);
    }

    #[test]
    fn page_bookmarks_carry_notes() {
        let mut bookmarks = Bookmarks::default();
        bookmarks.add_page(42, Some(2), Some(2), "", at(5_000));
        assert!(bookmarks.set_page_note(42, "revise"));
        assert!(!bookmarks.set_page_note(7, "missing"));
        assert_eq!(bookmarks.pages["42"].note, "revise");

        assert!(bookmarks.remove_page(42));
        assert!(!bookmarks.is_page_bookmarked(42));
    }

    #[test]
    fn json_matches_persisted_layout() {
        let mut bookmarks = Bookmarks::default();
        bookmarks.toggle_ayah(verse("1:1"), at(10));
        bookmarks.add_page(3, None, Some(1), "note", at(20));

        let json = serde_json::to_value(&bookmarks).unwrap();
        assert_eq!(json["ayahs"]["1:1"]["surahId"], 1);
        assert_eq!(json["ayahs"]["1:1"]["ayahNumber"], 1);
        assert_eq!(json["pages"]["3"]["parahNumber"], 1);
        assert!(json["pages"]["3"]["surahNumber"].is_null());
        assert_eq!(json["pages"]["3"]["note"], "note");
        assert!(json["surahs"].as_object().unwrap().is_empty());
    }

    #[test]
    fn reads_documents_without_pages() {
        let raw = r#"{"surahs":{},"ayahs":{"2:1":{"surahId":2,"ayahNumber":1,"timestamp":5}}}"#;
        let bookmarks: Bookmarks = serde_json::from_str(raw).unwrap();
        assert!(bookmarks.pages.is_empty());
        assert!(bookmarks.is_ayah_bookmarked(verse("2:1")));

        let mut bookmarks = bookmarks;
        bookmarks.clear();
        assert!(bookmarks.is_empty());
    }
}
