//! Recitation coordinator
//!
//! One `AudioCoordinator` is created at startup and shared by every verse
//! the reader has on screen. It owns the preload cache, the playback
//! registry and the per-verse sessions behind a single lock that is never
//! held across an await, so check-then-act sequences such as claiming a
//! warmed handle or clearing the previous stream cannot interleave.

use crate::cache::PreloadCache;
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::media::{progress_percent, MediaBackend};
use crate::registry::{Displaced, PlaybackRegistry};
use crate::sequencer::{self, CompletionDecision};
use crate::session::VerseSession;
use crate::types::{NowPlaying, PlaybackConfig, SessionState};
use crate::view::ReadingView;
use noor_core::types::SURAH_COUNT;
use noor_core::{AudioResolver, LoopTarget, ResolveError, ReciterId, VerseKey};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// Mutable state shared by all verses
struct Shared {
    reciter: ReciterId,
    loop_target: LoopTarget,
    sessions: HashMap<VerseKey, VerseSession>,
    cache: PreloadCache,
    registry: PlaybackRegistry,
    surah_fetch: Option<CancellationToken>,
    handoff: Option<PendingHandoff>,
    handoff_seq: u64,
    pending_events: Vec<PlaybackEvent>,
}

impl Shared {
    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn transition(&mut self, verse: VerseKey, state: SessionState) {
        let changed = self
            .sessions
            .get_mut(&verse)
            .is_some_and(|session| session.set_state(state));
        if changed {
            self.emit(PlaybackEvent::StateChanged { verse, state });
        }
    }

    fn report(&mut self, verse: Option<VerseKey>, err: &PlaybackError) {
        self.emit(PlaybackEvent::Error {
            verse,
            message: err.to_string(),
        });
    }

    /// Reflect what a registry registration paused
    fn mark_displaced(&mut self, displaced: Displaced) {
        if let Some(verse) = displaced.verse {
            let was_playing = self
                .sessions
                .get(&verse)
                .is_some_and(|s| s.state().is_playing());
            if was_playing {
                self.transition(verse, SessionState::Paused);
            }
        }
        if let Some(surah) = displaced.surah {
            self.emit(PlaybackEvent::SurahStopped { surah });
        }
    }

    /// Register a handoff from `from` to `next`, replacing any pending one
    fn begin_handoff(&mut self, from: VerseKey, next: VerseKey) -> HandoffTicket {
        self.cancel_handoff();
        self.handoff_seq = self.handoff_seq.wrapping_add(1);
        let ticket = HandoffTicket {
            id: self.handoff_seq,
            token: CancellationToken::new(),
        };
        self.handoff = Some(PendingHandoff {
            from,
            next,
            ticket: ticket.clone(),
        });
        ticket
    }

    /// Drop the pending handoff if `ticket` still owns it
    fn end_handoff(&mut self, ticket: &HandoffTicket) {
        if self.handoff.as_ref().is_some_and(|h| h.ticket.id == ticket.id) {
            self.handoff = None;
        }
    }

    fn cancel_handoff(&mut self) {
        if let Some(pending) = self.handoff.take() {
            pending.ticket.token.cancel();
            debug!(from = %pending.from, next = %pending.next, "Handoff cancelled");
        }
    }

    /// Cancel the pending handoff unless it is heading for `verse`
    fn cancel_handoff_unless(&mut self, verse: VerseKey) {
        if self.handoff.as_ref().is_some_and(|h| h.next != verse) {
            self.cancel_handoff();
        }
    }

    /// Cancel the pending handoff if it starts or ends at `verse`
    fn cancel_handoff_involving(&mut self, verse: VerseKey) {
        if self
            .handoff
            .as_ref()
            .is_some_and(|h| h.from == verse || h.next == verse)
        {
            self.cancel_handoff();
        }
    }

    /// Abandon every pending verse resolution except `keep`'s
    fn cancel_fetches_except(&mut self, keep: Option<VerseKey>) {
        for (verse, session) in &mut self.sessions {
            if Some(*verse) != keep && session.cancel_fetch() {
                debug!(%verse, "Cancelled pending resolution");
                self.pending_events.push(PlaybackEvent::StateChanged {
                    verse: *verse,
                    state: session.state(),
                });
            }
        }
    }
}

/// Identity and cancellation of one verse-to-verse handoff
#[derive(Debug, Clone)]
struct HandoffTicket {
    id: u64,
    token: CancellationToken,
}

/// The handoff waiting on its delay or on the next verse to mount
struct PendingHandoff {
    from: VerseKey,
    next: VerseKey,
    ticket: HandoffTicket,
}

/// A background resolution warming the preload cache
#[derive(Debug, Clone, Copy)]
struct PreloadJob {
    reciter: ReciterId,
    verse: VerseKey,
    epoch: u64,
}

/// Outcome of the locked part of a play request
enum PlayStep {
    Done(SessionState, Option<PreloadJob>),
    Fetch {
        generation: u64,
        token: CancellationToken,
        reciter: ReciterId,
    },
}

/// Audio coordinator for verse-by-verse recitation
///
/// Construct once with [`AudioCoordinator::new`] and share the returned
/// `Arc`. The host calls [`mount`](Self::mount) for each verse it renders,
/// [`toggle`](Self::toggle) for the play/pause control and
/// [`on_media_ended`](Self::on_media_ended) when a handle reaches its end.
pub struct AudioCoordinator {
    resolver: Arc<dyn AudioResolver>,
    backend: Arc<dyn MediaBackend>,
    view: Arc<dyn ReadingView>,
    config: PlaybackConfig,
    shared: Mutex<Shared>,
    mounts: watch::Sender<u64>,
}

impl AudioCoordinator {
    pub fn new(
        resolver: Arc<dyn AudioResolver>,
        backend: Arc<dyn MediaBackend>,
        view: Arc<dyn ReadingView>,
        config: PlaybackConfig,
    ) -> Arc<Self> {
        let shared = Shared {
            reciter: config.reciter,
            loop_target: config.loop_target,
            sessions: HashMap::new(),
            cache: PreloadCache::new(config.preload_capacity),
            registry: PlaybackRegistry::new(),
            surah_fetch: None,
            handoff: None,
            handoff_seq: 0,
            pending_events: Vec::new(),
        };

        Arc::new(Self {
            resolver,
            backend,
            view,
            config,
            shared: Mutex::new(shared),
            mounts: watch::channel(0).0,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Playable units =====

    /// Register a verse as playable
    ///
    /// `next` is the verse playback hands off to once this one finishes.
    /// Mounting an already mounted verse only updates `next`. Handoffs
    /// waiting for this verse resume as soon as it is mounted.
    pub fn mount(&self, verse: VerseKey, next: Option<VerseKey>) {
        {
            let mut shared = self.lock();
            shared
                .sessions
                .entry(verse)
                .and_modify(|session| session.set_next(next))
                .or_insert_with(|| VerseSession::new(verse, next));
        }
        self.mounts.send_modify(|count| *count = count.wrapping_add(1));
        debug!(%verse, "Verse mounted");
    }

    /// Remove a verse, cancelling its fetch and releasing its handle
    pub fn unmount(&self, verse: VerseKey) -> bool {
        let mut guard = self.lock();
        let shared = &mut *guard;
        let Some(mut session) = shared.sessions.remove(&verse) else {
            return false;
        };

        shared.cancel_handoff_involving(verse);
        shared.registry.release_verse(verse);
        if let Some(handle) = session.detach() {
            handle.pause();
        }
        debug!(%verse, "Verse unmounted");
        true
    }

    pub fn is_mounted(&self, verse: VerseKey) -> bool {
        self.lock().sessions.contains_key(&verse)
    }

    // ===== Play / pause =====

    /// The single play/pause control of a verse
    ///
    /// Pauses a playing verse and cancels a pending resolution. Otherwise
    /// starts playback as [`play`](Self::play) does.
    pub async fn toggle(self: &Arc<Self>, verse: VerseKey) -> Result<SessionState> {
        let state = self
            .state(verse)
            .ok_or(PlaybackError::UnknownVerse(verse))?;

        match state {
            SessionState::Playing | SessionState::Fetching => self.pause(verse),
            _ => self.play(verse).await,
        }
    }

    /// Pause a verse, keeping its position and loop count
    pub fn pause(&self, verse: VerseKey) -> Result<SessionState> {
        let mut guard = self.lock();
        let shared = &mut *guard;
        let session = shared
            .sessions
            .get_mut(&verse)
            .ok_or(PlaybackError::UnknownVerse(verse))?;

        match session.state() {
            SessionState::Playing => {
                if let Some(handle) = session.handle() {
                    handle.pause();
                }
                shared.registry.release_verse(verse);
                shared.transition(verse, SessionState::Paused);
                debug!(%verse, "Verse paused");
            }
            SessionState::Fetching => {
                session.cancel_fetch();
                shared.emit(PlaybackEvent::StateChanged {
                    verse,
                    state: SessionState::Idle,
                });
                debug!(%verse, "Resolution cancelled by reader");
            }
            _ => {}
        }

        Ok(shared
            .sessions
            .get(&verse)
            .map_or(SessionState::Idle, VerseSession::state))
    }

    /// Start or resume a verse
    ///
    /// A known source resumes without refetching. Otherwise a warmed
    /// handle is claimed from the preload cache, or the audio URL is
    /// resolved with the configured timeout. Resolution and media failures
    /// are logged and reflected in the returned state; a request superseded
    /// by another verse, a pause or a reciter change returns
    /// [`PlaybackError::Cancelled`]. A pending handoff to any other verse
    /// is cancelled.
    pub async fn play(self: &Arc<Self>, verse: VerseKey) -> Result<SessionState> {
        self.lock().cancel_handoff_unless(verse);
        self.start(verse, None).await
    }

    /// Shared body of [`play`](Self::play) and the sequencer's handoff
    ///
    /// A handoff starts the verse as a new loop sequence from the top,
    /// and gives up if its ticket was cancelled before the lock was taken.
    async fn start(
        self: &Arc<Self>,
        verse: VerseKey,
        handoff: Option<&HandoffTicket>,
    ) -> Result<SessionState> {
        let fresh = handoff.is_some();
        let step = {
            let mut guard = self.lock();
            let shared = &mut *guard;
            let reciter = shared.reciter;

            if let Some(ticket) = handoff {
                if ticket.token.is_cancelled() {
                    return Err(PlaybackError::Cancelled);
                }
                shared.end_handoff(ticket);
            }

            shared.cancel_fetches_except(Some(verse));
            let session = shared
                .sessions
                .get_mut(&verse)
                .ok_or(PlaybackError::UnknownVerse(verse))?;

            match session.state() {
                SessionState::Playing | SessionState::Fetching => {
                    return Ok(session.state());
                }
                _ => {}
            }

            if session.handle().is_none() {
                if let Some(handle) = shared.cache.claim(reciter, verse) {
                    session.attach(handle);
                }
            }

            if session.handle().is_some() {
                let (state, job) = self.start_locked(shared, verse, fresh)?;
                PlayStep::Done(state, job)
            } else {
                let (generation, token) = session.begin_fetch();
                shared.emit(PlaybackEvent::StateChanged {
                    verse,
                    state: SessionState::Fetching,
                });
                PlayStep::Fetch {
                    generation,
                    token,
                    reciter,
                }
            }
        };

        let (generation, token, reciter) = match step {
            PlayStep::Done(state, job) => {
                self.spawn_preload(job);
                return Ok(state);
            }
            PlayStep::Fetch {
                generation,
                token,
                reciter,
            } => (generation, token, reciter),
        };

        debug!(%verse, %reciter, "Resolving verse audio");
        let resolved = self
            .resolve_cancellable(&token, self.resolver.resolve_verse(reciter, verse))
            .await;
        let Some(resolved) = resolved else {
            debug!(%verse, "Resolution abandoned");
            return Err(PlaybackError::Cancelled);
        };

        let (state, job) = {
            let mut guard = self.lock();
            let shared = &mut *guard;
            let Some(session) = shared.sessions.get_mut(&verse) else {
                return Err(PlaybackError::Cancelled);
            };
            if !session.is_current_fetch(generation) || shared.reciter != reciter {
                debug!(%verse, "Discarding stale resolution");
                return Err(PlaybackError::Cancelled);
            }

            let opened = resolved
                .map_err(PlaybackError::from)
                .and_then(|url| self.backend.open(&url));

            match opened {
                Ok(handle) => {
                    session.attach(handle);
                    shared.emit(PlaybackEvent::StateChanged {
                        verse,
                        state: SessionState::Ready,
                    });
                    self.start_locked(shared, verse, fresh)?
                }
                Err(err @ PlaybackError::Resolution(_)) => {
                    warn!(%verse, %reciter, error = %err, "Audio resolution failed");
                    session.fail_fetch();
                    shared.emit(PlaybackEvent::StateChanged {
                        verse,
                        state: SessionState::Error,
                    });
                    shared.report(Some(verse), &err);
                    return Ok(SessionState::Error);
                }
                Err(err) => {
                    warn!(%verse, error = %err, "Media could not be opened");
                    session.detach();
                    shared.emit(PlaybackEvent::StateChanged {
                        verse,
                        state: SessionState::Idle,
                    });
                    shared.report(Some(verse), &err);
                    return Ok(SessionState::Idle);
                }
            }
        };

        self.spawn_preload(job);
        Ok(state)
    }

    /// Enter `Playing` on the session's handle
    ///
    /// Every other stream is paused and cleared first. A `fresh` start, or
    /// one from `Completed`, rewinds and resets the loop count. On success
    /// the next verse is scheduled for preloading unless it is already warm
    /// or in flight.
    fn start_locked(
        &self,
        shared: &mut Shared,
        verse: VerseKey,
        fresh: bool,
    ) -> Result<(SessionState, Option<PreloadJob>)> {
        let reciter = shared.reciter;
        let session = shared
            .sessions
            .get_mut(&verse)
            .ok_or(PlaybackError::UnknownVerse(verse))?;
        let Some(handle) = session.handle().cloned() else {
            return Ok((session.state(), None));
        };
        let next = session.next();

        if fresh || session.state() == SessionState::Completed {
            session.reset_loop();
            if let Err(err) = handle.restart() {
                warn!(%verse, error = %err, "Could not rewind verse");
            }
        }

        shared.cancel_fetches_except(Some(verse));
        if let Some(token) = shared.surah_fetch.take() {
            token.cancel();
        }
        let displaced = shared.registry.register_verse(verse, Arc::clone(&handle));
        shared.mark_displaced(displaced);

        if let Err(err) = handle.play() {
            warn!(%verse, error = %err, "Media refused to play");
            shared.registry.release_verse(verse);
            shared.transition(verse, SessionState::Ready);
            shared.report(Some(verse), &err);
            return Ok((SessionState::Ready, None));
        }

        shared.transition(verse, SessionState::Playing);
        info!(%verse, %reciter, "Verse playing");

        let job = match next {
            Some(next) if shared.cache.begin_fetch(reciter, next) => Some(PreloadJob {
                reciter,
                verse: next,
                epoch: shared.cache.epoch(),
            }),
            _ => None,
        };
        Ok((SessionState::Playing, job))
    }

    async fn resolve_cancellable(
        &self,
        token: &CancellationToken,
        resolve: impl Future<Output = std::result::Result<Url, ResolveError>>,
    ) -> Option<std::result::Result<Url, ResolveError>> {
        tokio::select! {
            () = token.cancelled() => None,
            result = tokio::time::timeout(self.config.resolve_timeout, resolve) => {
                Some(result.unwrap_or(Err(ResolveError::Timeout)))
            }
        }
    }

    // ===== Preloading =====

    /// Warm the cache for `verse` under the current reciter
    ///
    /// Returns `false` when it is already warm or being fetched.
    pub fn preload(self: &Arc<Self>, verse: VerseKey) -> bool {
        let job = {
            let mut shared = self.lock();
            let reciter = shared.reciter;
            if !shared.cache.begin_fetch(reciter, verse) {
                return false;
            }
            PreloadJob {
                reciter,
                verse,
                epoch: shared.cache.epoch(),
            }
        };
        self.spawn_preload(Some(job));
        true
    }

    /// Whether `verse` is warm in the cache for the current reciter
    pub fn is_warm(&self, verse: VerseKey) -> bool {
        let shared = self.lock();
        shared.cache.contains(shared.reciter, verse)
    }

    fn spawn_preload(self: &Arc<Self>, job: Option<PreloadJob>) {
        if let Some(job) = job {
            debug!(verse = %job.verse, reciter = %job.reciter, "Preloading");
            tokio::spawn(Arc::clone(self).run_preload(job));
        }
    }

    async fn run_preload(self: Arc<Self>, job: PreloadJob) {
        let resolved = tokio::time::timeout(
            self.config.resolve_timeout,
            self.resolver.resolve_verse(job.reciter, job.verse),
        )
        .await
        .unwrap_or(Err(ResolveError::Timeout));

        let mut guard = self.lock();
        let shared = &mut *guard;
        if !shared.cache.finish_fetch(job.reciter, job.verse, job.epoch) {
            debug!(verse = %job.verse, "Dropping preload from before cache clear");
            return;
        }

        match resolved
            .map_err(PlaybackError::from)
            .and_then(|url| self.backend.open(&url))
        {
            Ok(handle) => {
                shared.cache.put(job.reciter, job.verse, handle);
                shared.emit(PlaybackEvent::Preloaded {
                    verse: job.verse,
                    reciter: job.reciter,
                });
            }
            Err(err) => warn!(verse = %job.verse, error = %err, "Preload failed"),
        }
    }

    // ===== Completion =====

    /// Handle natural end of media for `verse`
    ///
    /// Replays the verse until the loop target is reached, then pauses it
    /// and hands off to its next verse: scrolled into view, started at once
    /// when already warm, or after the handoff delay otherwise. The handoff
    /// waits (bounded) for the next verse to be mounted. Duplicate end
    /// signals are ignored.
    pub async fn on_media_ended(self: &Arc<Self>, verse: VerseKey) -> Result<CompletionDecision> {
        let (decision, handoff) = {
            let mut guard = self.lock();
            let shared = &mut *guard;
            let target = shared.loop_target;
            let reciter = shared.reciter;
            let session = shared
                .sessions
                .get_mut(&verse)
                .ok_or(PlaybackError::UnknownVerse(verse))?;

            let decision = sequencer::on_completion(session, target);
            match decision {
                CompletionDecision::Ignore => {
                    debug!(%verse, state = ?session.state(), "Ignoring end of media");
                }
                CompletionDecision::Replay { iteration } => {
                    let handle = session.handle().cloned();
                    debug!(%verse, iteration, %target, "Replaying verse");
                    shared.emit(PlaybackEvent::LoopIteration {
                        verse,
                        iteration,
                        target,
                    });
                    if let Some(handle) = handle {
                        if let Err(err) = handle.restart().and_then(|()| handle.play()) {
                            warn!(%verse, error = %err, "Replay failed");
                            shared.registry.release_verse(verse);
                            shared.transition(verse, SessionState::Ready);
                            shared.report(Some(verse), &err);
                        }
                    }
                }
                CompletionDecision::Advance { next } => {
                    let iterations = session.completed_iterations();
                    let duration_ms = session
                        .handle()
                        .and_then(|handle| handle.duration())
                        .map(|d| d.as_millis() as u64);
                    if let Some(handle) = session.handle() {
                        handle.pause();
                    }
                    shared.registry.release_verse(verse);
                    shared.transition(verse, SessionState::Completed);
                    shared.emit(PlaybackEvent::VerseCompleted {
                        verse,
                        duration_ms,
                        iterations,
                    });
                    info!(%verse, iterations, "Verse completed");

                    if let Some(next) = next {
                        shared.emit(PlaybackEvent::ScrollRequested { verse: next });
                        shared.emit(PlaybackEvent::Advanced {
                            from: verse,
                            to: next,
                        });
                    }
                }
            }

            let handoff = match decision {
                CompletionDecision::Advance { next: Some(next) } => {
                    let warm = shared.cache.contains(reciter, next)
                        || shared
                            .sessions
                            .get(&next)
                            .is_some_and(|s| s.handle().is_some());
                    Some((next, warm, shared.begin_handoff(verse, next)))
                }
                _ => None,
            };
            (decision, handoff)
        };

        if let Some((next, warm, ticket)) = handoff {
            self.hand_off(verse, next, warm, ticket).await;
        }
        Ok(decision)
    }

    /// Move playback on to `next`
    ///
    /// Cancelled by a reciter change, [`stop_all`](Self::stop_all), the
    /// reader playing another verse or either verse being unmounted.
    async fn hand_off(
        self: &Arc<Self>,
        from: VerseKey,
        next: VerseKey,
        warm: bool,
        ticket: HandoffTicket,
    ) {
        self.view.scroll_into_view(next);
        if !warm {
            tokio::select! {
                () = ticket.token.cancelled() => return,
                () = tokio::time::sleep(self.config.handoff_delay) => {}
            }
        }

        let mounted = tokio::select! {
            () = ticket.token.cancelled() => return,
            mounted = self.wait_until_mounted(next) => mounted,
        };
        if !mounted {
            warn!(%from, %next, "Next verse never became ready; stopping");
            self.lock().end_handoff(&ticket);
            return;
        }

        match self.start(next, Some(&ticket)).await {
            Ok(state) => debug!(%from, %next, ?state, "Handed off"),
            Err(PlaybackError::Cancelled) => debug!(%from, %next, "Handoff superseded"),
            Err(err) => warn!(%from, %next, error = %err, "Handoff failed"),
        }
    }

    async fn wait_until_mounted(&self, verse: VerseKey) -> bool {
        let mut mounts = self.mounts.subscribe();
        let ready = async {
            loop {
                if self.is_mounted(verse) {
                    return true;
                }
                if mounts.changed().await.is_err() {
                    return false;
                }
            }
        };
        tokio::time::timeout(self.config.readiness_timeout, ready)
            .await
            .unwrap_or(false)
    }

    // ===== Settings =====

    pub fn reciter(&self) -> ReciterId {
        self.lock().reciter
    }

    /// Switch the reciter for all playback
    ///
    /// Stops whatever is playing, forgets every resolved source and clears
    /// the preload cache. Nothing restarts until the reader plays again.
    pub fn set_reciter(&self, reciter: ReciterId) -> bool {
        let mut guard = self.lock();
        let shared = &mut *guard;
        if shared.reciter == reciter {
            return false;
        }

        shared.reciter = reciter;
        shared.cancel_handoff();
        shared.registry.clear_verse();
        if let Some(token) = shared.surah_fetch.take() {
            token.cancel();
        }
        if let Some(surah) = shared.registry.clear_surah() {
            shared.emit(PlaybackEvent::SurahStopped { surah });
        }

        for (verse, session) in &mut shared.sessions {
            let before = session.state();
            if let Some(handle) = session.detach() {
                handle.pause();
            }
            if before != SessionState::Idle {
                shared.pending_events.push(PlaybackEvent::StateChanged {
                    verse: *verse,
                    state: SessionState::Idle,
                });
            }
        }
        shared.cache.clear();
        shared.emit(PlaybackEvent::ReciterChanged { reciter });
        info!(%reciter, "Reciter changed");
        true
    }

    pub fn loop_target(&self) -> LoopTarget {
        self.lock().loop_target
    }

    /// Change how many times each verse plays
    ///
    /// Read at every completion, so a verse that is looping picks it up
    /// from its next end of media.
    pub fn set_loop_target(&self, target: LoopTarget) {
        let mut shared = self.lock();
        if shared.loop_target != target {
            shared.loop_target = target;
            shared.emit(PlaybackEvent::LoopTargetChanged { target });
            debug!(%target, "Loop target changed");
        }
    }

    /// Step the loop target through its menu, returning the new value
    pub fn cycle_loop_target(&self) -> LoopTarget {
        let target = self.loop_target().cycle();
        self.set_loop_target(target);
        target
    }

    // ===== Surah recitation =====

    /// Play a full-surah recitation, stopping any verse playback
    pub async fn play_surah(self: &Arc<Self>, surah: u8) -> Result<()> {
        if surah == 0 || surah > SURAH_COUNT {
            return Err(PlaybackError::InvalidSurah(surah));
        }

        let (reciter, token) = {
            let mut shared = self.lock();
            shared.cancel_handoff();
            if let Some(previous) = shared.surah_fetch.take() {
                previous.cancel();
            }
            let token = CancellationToken::new();
            shared.surah_fetch = Some(token.clone());
            (shared.reciter, token)
        };

        debug!(surah, %reciter, "Resolving surah audio");
        let Some(resolved) = self
            .resolve_cancellable(&token, self.resolver.resolve_chapter(reciter, surah))
            .await
        else {
            return Err(PlaybackError::Cancelled);
        };

        let mut guard = self.lock();
        let shared = &mut *guard;
        if token.is_cancelled() || shared.reciter != reciter {
            return Err(PlaybackError::Cancelled);
        }
        shared.surah_fetch = None;

        let handle = match resolved
            .map_err(PlaybackError::from)
            .and_then(|url| self.backend.open(&url))
        {
            Ok(handle) => handle,
            Err(err) => {
                warn!(surah, %reciter, error = %err, "Surah audio unavailable");
                shared.report(None, &err);
                return Err(err);
            }
        };

        shared.cancel_fetches_except(None);
        let displaced = shared.registry.register_surah(surah, Arc::clone(&handle));
        shared.mark_displaced(displaced);

        if let Err(err) = handle.play() {
            warn!(surah, error = %err, "Media refused to play surah");
            shared.registry.clear_surah();
            shared.report(None, &err);
            return Err(err);
        }

        shared.emit(PlaybackEvent::SurahStarted { surah });
        info!(surah, %reciter, "Surah playing");
        Ok(())
    }

    /// Stop the surah recitation, returning whether one was active
    pub fn stop_surah(&self) -> bool {
        let mut shared = self.lock();
        if let Some(token) = shared.surah_fetch.take() {
            token.cancel();
        }
        match shared.registry.clear_surah() {
            Some(surah) => {
                shared.emit(PlaybackEvent::SurahStopped { surah });
                true
            }
            None => false,
        }
    }

    /// Pause everything and abandon pending resolutions
    pub fn stop_all(&self) {
        let mut guard = self.lock();
        let shared = &mut *guard;

        shared.cancel_handoff();
        if let Some(verse) = shared.registry.clear_verse() {
            shared.transition(verse, SessionState::Paused);
        }
        if let Some(token) = shared.surah_fetch.take() {
            token.cancel();
        }
        if let Some(surah) = shared.registry.clear_surah() {
            shared.emit(PlaybackEvent::SurahStopped { surah });
        }
        shared.cancel_fetches_except(None);
        debug!("All playback stopped");
    }

    // ===== Queries =====

    pub fn state(&self, verse: VerseKey) -> Option<SessionState> {
        self.lock().sessions.get(&verse).map(VerseSession::state)
    }

    /// Plays completed in the verse's current loop sequence
    pub fn completed_iterations(&self, verse: VerseKey) -> Option<u32> {
        self.lock()
            .sessions
            .get(&verse)
            .map(VerseSession::completed_iterations)
    }

    pub fn source_url(&self, verse: VerseKey) -> Option<Url> {
        self.lock()
            .sessions
            .get(&verse)
            .and_then(|s| s.source_url().cloned())
    }

    /// Progress of a verse's handle in percent
    pub fn progress(&self, verse: VerseKey) -> Option<f32> {
        self.lock()
            .sessions
            .get(&verse)
            .and_then(VerseSession::handle)
            .map(|handle| progress_percent(handle.as_ref()))
    }

    pub fn now_playing(&self) -> NowPlaying {
        self.lock().registry.current()
    }

    // ===== Events =====

    /// Take all events queued since the last call
    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.lock().pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Emit [`PlaybackEvent::Progress`] for the playing verse every `period`
    ///
    /// The task ends on its own once the coordinator is dropped.
    pub fn spawn_progress_sampler(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);
        let period = period.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(coordinator) = weak.upgrade() else {
                    break;
                };
                coordinator.sample_progress();
            }
        })
    }

    fn sample_progress(&self) {
        let mut shared = self.lock();
        let Some((verse, handle)) = shared.registry.verse_handle() else {
            return;
        };
        let percent = progress_percent(handle.as_ref());
        shared.emit(PlaybackEvent::Progress { verse, percent });
    }
}

impl std::fmt::Debug for AudioCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.lock();
        f.debug_struct("AudioCoordinator")
            .field("reciter", &shared.reciter)
            .field("loop_target", &shared.loop_target)
            .field("mounted", &shared.sessions.len())
            .field("cache", &shared.cache)
            .field("now_playing", &shared.registry.current())
            .finish_non_exhaustive()
    }
}
