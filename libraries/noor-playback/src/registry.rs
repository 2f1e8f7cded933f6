//! Global playback registry
//!
//! Holds the single active stream: at most one verse-level handle or one
//! surah-level handle. Registering either level pauses and drops whatever
//! was registered before.

use crate::media::{same_handle, MediaHandle};
use crate::types::NowPlaying;
use noor_core::VerseKey;
use std::sync::Arc;
use tracing::debug;

/// What a registration pushed out of the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Displaced {
    pub verse: Option<VerseKey>,
    pub surah: Option<u8>,
}

#[derive(Debug, Default)]
pub struct PlaybackRegistry {
    verse: Option<(VerseKey, Arc<dyn MediaHandle>)>,
    surah: Option<(u8, Arc<dyn MediaHandle>)>,
}

impl PlaybackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `handle` the active verse stream
    ///
    /// Any surah recitation and any other verse are paused first.
    /// Re-registering the handle that is already active displaces nothing.
    pub fn register_verse(&mut self, verse: VerseKey, handle: Arc<dyn MediaHandle>) -> Displaced {
        let mut displaced = Displaced {
            surah: self.clear_surah(),
            verse: None,
        };

        if let Some((previous, current)) = self.verse.take() {
            if same_handle(&current, &handle) {
                debug!(%verse, "Verse already registered");
            } else {
                current.pause();
                displaced.verse = Some(previous);
            }
        }

        self.verse = Some((verse, handle));
        displaced
    }

    /// Make `handle` the active surah recitation, pausing any verse stream
    pub fn register_surah(&mut self, surah: u8, handle: Arc<dyn MediaHandle>) -> Displaced {
        let mut displaced = Displaced {
            verse: self.clear_verse(),
            surah: None,
        };

        if let Some((previous, current)) = self.surah.take() {
            if !same_handle(&current, &handle) {
                current.pause();
                displaced.surah = Some(previous);
            }
        }

        self.surah = Some((surah, handle));
        displaced
    }

    /// Pause and drop the verse stream, returning which verse it was
    pub fn clear_verse(&mut self) -> Option<VerseKey> {
        self.verse.take().map(|(verse, handle)| {
            handle.pause();
            verse
        })
    }

    /// Pause and drop the surah recitation, returning which surah it was
    pub fn clear_surah(&mut self) -> Option<u8> {
        self.surah.take().map(|(surah, handle)| {
            handle.pause();
            surah
        })
    }

    /// Clear the verse stream only if it belongs to `verse`
    pub fn release_verse(&mut self, verse: VerseKey) -> bool {
        if self.is_verse_active(verse) {
            self.clear_verse();
            true
        } else {
            false
        }
    }

    pub fn is_verse_active(&self, verse: VerseKey) -> bool {
        matches!(&self.verse, Some((active, _)) if *active == verse)
    }

    pub fn verse_handle(&self) -> Option<(VerseKey, &Arc<dyn MediaHandle>)> {
        self.verse.as_ref().map(|(verse, handle)| (*verse, handle))
    }

    pub fn surah_handle(&self) -> Option<(u8, &Arc<dyn MediaHandle>)> {
        self.surah.as_ref().map(|(surah, handle)| (*surah, handle))
    }

    pub fn current(&self) -> NowPlaying {
        NowPlaying {
            verse: self.verse.as_ref().map(|(verse, _)| *verse),
            surah: self.surah.as_ref().map(|(surah, _)| *surah),
        }
    }
}
