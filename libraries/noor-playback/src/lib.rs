//! Noor - Recitation Playback
//!
//! Verse-by-verse recitation for the Noor Quran reader.
//!
//! This crate provides:
//! - Per-verse playback sessions (fetch, play, pause, loop)
//! - Loop-then-advance sequencing with a configurable repeat count
//! - Preloading of the next verse while the current one plays
//! - A single-stream registry shared by verse and full-surah playback
//! - Cancellation of superseded audio resolutions
//!
//! # Architecture
//!
//! `noor-playback` does not decode or output audio:
//! - Audio URLs come from an [`AudioResolver`](noor_core::AudioResolver)
//! - Playable handles come from a [`MediaBackend`] supplied by the host
//! - Scrolling is delegated to a [`ReadingView`]
//!
//! The host reports natural end of media back to the coordinator, which
//! decides whether to replay the verse or hand off to the next one.
//!
//! # Example
//!
//! ```rust,no_run
//! use noor_playback::{AudioCoordinator, MediaBackend, NoView, PlaybackConfig};
//! use noor_core::{AudioResolver, LoopTarget, VerseKey};
//! use std::sync::Arc;
//!
//! # async fn run(resolver: Arc<dyn AudioResolver>, backend: Arc<dyn MediaBackend>) {
//! let coordinator = AudioCoordinator::new(
//!     resolver,
//!     backend,
//!     Arc::new(NoView),
//!     PlaybackConfig::default(),
//! );
//!
//! let verse: VerseKey = "2:255".parse().unwrap();
//! coordinator.mount(verse, verse.next_in_surah());
//! coordinator.set_loop_target(LoopTarget::Times(3));
//!
//! coordinator.toggle(verse).await.ok();
//!
//! // Later, when the platform reports that the audio finished:
//! coordinator.on_media_ended(verse).await.ok();
//! # }
//! ```

pub mod cache;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod media;
pub mod registry;
pub mod sequencer;
pub mod session;
pub mod types;
pub mod view;

pub use cache::PreloadCache;
pub use coordinator::AudioCoordinator;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use media::{MediaBackend, MediaHandle};
pub use registry::{Displaced, PlaybackRegistry};
pub use sequencer::CompletionDecision;
pub use session::VerseSession;
pub use types::{NowPlaying, PlaybackConfig, SessionState};
pub use view::{NoView, ReadingView};
