//! Playback Events
//!
//! Event-based communication for UI synchronization during recitation.
//! Events are queued by the coordinator and collected with
//! `AudioCoordinator::drain_events`.

use crate::types::SessionState;
use noor_core::{LoopTarget, ReciterId, VerseKey};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// A verse session changed state
    StateChanged {
        verse: VerseKey,
        state: SessionState,
    },

    /// A verse was rewound for another play
    LoopIteration {
        verse: VerseKey,
        /// Completed plays so far
        iteration: u32,
        target: LoopTarget,
    },

    /// A verse finished its last loop
    ///
    /// Reading-progress tracking records the verse as read on this event.
    VerseCompleted {
        verse: VerseKey,
        /// Length of one play, when the media engine reported it
        duration_ms: Option<u64>,
        iterations: u32,
    },

    /// The next verse's audio is warm in the preload cache
    Preloaded { verse: VerseKey, reciter: ReciterId },

    /// The view should bring a verse on screen
    ScrollRequested { verse: VerseKey },

    /// Playback moved on from one verse to the next
    Advanced { from: VerseKey, to: VerseKey },

    /// A full surah recitation started
    SurahStarted { surah: u8 },

    /// A full surah recitation stopped or was displaced
    SurahStopped { surah: u8 },

    /// The active reciter changed; every source was invalidated
    ReciterChanged { reciter: ReciterId },

    /// The loop target setting changed
    LoopTargetChanged { target: LoopTarget },

    /// Periodic progress of the playing verse (0-100)
    Progress { verse: VerseKey, percent: f32 },

    /// A non-fatal failure that was logged and folded into state
    Error {
        verse: Option<VerseKey>,
        message: String,
    },
}

impl PlaybackEvent {
    /// Verse the event concerns, if any
    pub fn verse(&self) -> Option<VerseKey> {
        match self {
            PlaybackEvent::StateChanged { verse, .. }
            | PlaybackEvent::LoopIteration { verse, .. }
            | PlaybackEvent::VerseCompleted { verse, .. }
            | PlaybackEvent::Preloaded { verse, .. }
            | PlaybackEvent::ScrollRequested { verse }
            | PlaybackEvent::Progress { verse, .. } => Some(*verse),
            PlaybackEvent::Advanced { to, .. } => Some(*to),
            PlaybackEvent::Error { verse, .. } => *verse,
            PlaybackEvent::SurahStarted { .. }
            | PlaybackEvent::SurahStopped { .. }
            | PlaybackEvent::ReciterChanged { .. }
            | PlaybackEvent::LoopTargetChanged { .. } => None,
        }
    }
}
