/// Core domain types for Noor
mod bookmarks;
mod content;
mod ids;
mod loop_target;
mod progress;
pub mod quran;
mod settings;

pub use bookmarks::{AyahBookmark, BookmarkSort, Bookmarks, PageBookmark};
pub use content::{
    Ayah, AyahSummary, PageLine, Parah, ReadingEntry, RukuAyah, RukuDetail, RukuMetadata,
    RukuRange, Sajda, SearchHit, Surah, SurahDetail,
};
pub use ids::{ReciterId, VerseKey};
pub use loop_target::LoopTarget;
pub use progress::{LastRead, ReadingProgress, Streaks, DEFAULT_DAILY_GOAL};
pub use quran::{parah_of, parah_start, verse_count, PARAH_COUNT, SURAH_COUNT};
pub use settings::{keys, FontSizes, ReaderSettings, Script, Theme, MIN_FONT_SIZE};
