//! Core types for recitation playback

use noor_core::{LoopTarget, ReciterId, VerseKey};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// State of one verse's playback session
///
/// `Idle → Fetching → Ready → Playing ⇄ Paused → Completed`, with
/// `Fetching → Error` when the audio URL cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// No media handle yet
    #[default]
    Idle,
    /// Audio URL resolution in flight
    Fetching,
    /// Source known, not started in this session
    Ready,
    /// Media advancing
    Playing,
    /// Stopped by the reader, position retained
    Paused,
    /// Loop target reached and playback handed off
    Completed,
    /// Resolution failed; still playable
    Error,
}

impl SessionState {
    pub fn is_playing(self) -> bool {
        self == SessionState::Playing
    }
}

/// What is currently registered as the single active stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub verse: Option<VerseKey>,
    pub surah: Option<u8>,
}

impl NowPlaying {
    pub fn is_idle(&self) -> bool {
        self.verse.is_none() && self.surah.is_none()
    }
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Reciter whose audio is played (default: 7)
    pub reciter: ReciterId,

    /// Plays per verse before advancing (default: once)
    pub loop_target: LoopTarget,

    /// Wait before handing off to a verse that is not preloaded (default: 300ms)
    pub handoff_delay: Duration,

    /// How long a handoff waits for the next verse to be mounted (default: 2s)
    pub readiness_timeout: Duration,

    /// Upper bound on one audio URL resolution (default: 10s)
    pub resolve_timeout: Duration,

    /// Progress sampling period while a verse plays (default: 250ms)
    pub progress_interval: Duration,

    /// Warmed handles kept by the preload cache (default: 16)
    pub preload_capacity: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            reciter: ReciterId::DEFAULT,
            loop_target: LoopTarget::default(),
            handoff_delay: Duration::from_millis(300),
            readiness_timeout: Duration::from_secs(2),
            resolve_timeout: Duration::from_secs(10),
            progress_interval: Duration::from_millis(250),
            preload_capacity: 16,
        }
    }
}
