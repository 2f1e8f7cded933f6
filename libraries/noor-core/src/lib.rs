//! Noor Core
//!
//! Platform-agnostic core types, traits, and error handling for the Noor
//! Quran reader.
//!
//! This crate provides the foundational building blocks shared by the
//! content server, the HTTP clients, and the recitation coordinator.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `VerseKey`, `ReciterId`, `LoopTarget`, content rows
//! - **Persisted State**: `Bookmarks`, `ReadingProgress`, `ReaderSettings`
//! - **Core Traits**: `AudioResolver`
//! - **Error Handling**: Unified `NoorError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use noor_core::types::{LoopTarget, VerseKey};
//!
//! let verse: VerseKey = "2:255".parse().unwrap();
//! assert_eq!(verse.next_in_surah(), Some(VerseKey::new(2, 256).unwrap()));
//!
//! // The last verse of a surah has no successor
//! assert_eq!(VerseKey::new(1, 7).unwrap().next_in_surah(), None);
//!
//! let target = LoopTarget::default().cycle();
//! assert_eq!(target, LoopTarget::Times(3));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{NoorError, Result};
pub use traits::{AudioResolver, ResolveError};

pub use types::{
    Ayah, AyahSummary, BookmarkSort, Bookmarks, LoopTarget, PageLine, Parah, ReaderSettings,
    ReadingEntry, ReadingProgress, ReciterId, RukuAyah, RukuDetail, RukuMetadata, RukuRange,
    Sajda, SearchHit, Surah, SurahDetail, VerseKey,
};
