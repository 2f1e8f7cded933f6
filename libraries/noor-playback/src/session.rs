//! Per-verse playback session

use crate::media::MediaHandle;
use crate::types::SessionState;
use noor_core::VerseKey;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Playback state of one mounted verse
///
/// Tracks the loop count of the current completion sequence and a one-shot
/// guard so a duplicated end-of-media signal cannot advance twice. Both
/// reset only when a new source is loaded or a finished session is
/// started again.
#[derive(Debug)]
pub struct VerseSession {
    verse: VerseKey,
    next: Option<VerseKey>,
    state: SessionState,
    handle: Option<Arc<dyn MediaHandle>>,
    completed_iterations: u32,
    advanced: bool,
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl VerseSession {
    pub fn new(verse: VerseKey, next: Option<VerseKey>) -> Self {
        Self {
            verse,
            next,
            state: SessionState::Idle,
            handle: None,
            completed_iterations: 0,
            advanced: false,
            generation: 0,
            cancel: None,
        }
    }

    pub fn verse(&self) -> VerseKey {
        self.verse
    }

    /// Verse to hand off to once this one has finished looping
    pub fn next(&self) -> Option<VerseKey> {
        self.next
    }

    pub fn set_next(&mut self, next: Option<VerseKey>) {
        self.next = next;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Move to `state`, returning whether it changed
    pub fn set_state(&mut self, state: SessionState) -> bool {
        let changed = self.state != state;
        self.state = state;
        changed
    }

    pub fn handle(&self) -> Option<&Arc<dyn MediaHandle>> {
        self.handle.as_ref()
    }

    pub fn source_url(&self) -> Option<&Url> {
        self.handle.as_ref().map(|h| h.source_url())
    }

    pub fn completed_iterations(&self) -> u32 {
        self.completed_iterations
    }

    pub fn has_advanced(&self) -> bool {
        self.advanced
    }

    /// Attach a loaded handle and move to `Ready`
    ///
    /// Loading a different source starts a new completion sequence.
    pub fn attach(&mut self, handle: Arc<dyn MediaHandle>) {
        if self.source_url() != Some(handle.source_url()) {
            self.reset_loop();
        }
        self.handle = Some(handle);
        self.cancel = None;
        self.state = SessionState::Ready;
    }

    /// Drop the handle and forget the source, e.g. after a reciter change
    pub fn detach(&mut self) -> Option<Arc<dyn MediaHandle>> {
        self.cancel_fetch();
        self.reset_loop();
        self.state = SessionState::Idle;
        self.handle.take()
    }

    /// Start a new loop sequence on the current source
    pub fn reset_loop(&mut self) {
        self.completed_iterations = 0;
        self.advanced = false;
    }

    /// Count one natural completion
    pub(crate) fn record_completion(&mut self) -> u32 {
        self.completed_iterations = self.completed_iterations.saturating_add(1);
        self.completed_iterations
    }

    /// Close the sequence; returns `false` if it was already closed
    pub(crate) fn mark_advanced(&mut self) -> bool {
        !std::mem::replace(&mut self.advanced, true)
    }

    /// Enter `Fetching` for a fresh resolution
    ///
    /// Any earlier fetch is cancelled. The returned generation identifies
    /// this fetch; results carrying an older generation must be dropped.
    pub fn begin_fetch(&mut self) -> (u64, CancellationToken) {
        self.cancel_fetch();
        self.generation += 1;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.state = SessionState::Fetching;
        (self.generation, token)
    }

    /// Cancel an in-flight fetch, falling back to `Idle`
    ///
    /// Returns whether a fetch was pending.
    pub fn cancel_fetch(&mut self) -> bool {
        let Some(token) = self.cancel.take() else {
            return false;
        };
        token.cancel();
        self.generation += 1;
        if self.state == SessionState::Fetching {
            self.state = SessionState::Idle;
        }
        true
    }

    /// Whether a fetch started at `generation` is still wanted
    pub fn is_current_fetch(&self, generation: u64) -> bool {
        self.generation == generation && self.state == SessionState::Fetching
    }

    /// Record a failed resolution; the verse stays playable
    pub fn fail_fetch(&mut self) {
        self.cancel = None;
        self.state = SessionState::Error;
    }
}
