//! Test doubles for the coordinator suites
//!
//! A scripted resolver, an in-memory media backend and a view that records
//! scroll requests. Resolver delays use tokio time, so suites run with a
//! paused clock.

#![allow(dead_code)]

use async_trait::async_trait;
use noor_core::{AudioResolver, LoopTarget, ResolveError, ReciterId, VerseKey};
use noor_playback::{
    AudioCoordinator, MediaBackend, MediaHandle, PlaybackConfig, PlaybackError, PlaybackEvent,
    ReadingView,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

// ===== Resolver =====

#[derive(Default)]
pub struct FakeResolver {
    calls: Mutex<Vec<(ReciterId, VerseKey)>>,
    delays: Mutex<HashMap<VerseKey, Duration>>,
    failing: Mutex<HashSet<VerseKey>>,
}

impl FakeResolver {
    /// Make resolutions of `verse` take `delay`
    pub fn delay(&self, verse: VerseKey, delay: Duration) {
        self.delays.lock().unwrap().insert(verse, delay);
    }

    pub fn fail(&self, verse: VerseKey) {
        self.failing.lock().unwrap().insert(verse);
    }

    pub fn recover(&self, verse: VerseKey) {
        self.failing.lock().unwrap().remove(&verse);
    }

    pub fn calls_for(&self, verse: VerseKey) -> usize {
        self.reciters_for(verse).len()
    }

    pub fn reciters_for(&self, verse: VerseKey) -> Vec<ReciterId> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, v)| *v == verse)
            .map(|(r, _)| *r)
            .collect()
    }
}

#[async_trait]
impl AudioResolver for FakeResolver {
    async fn resolve_verse(
        &self,
        reciter: ReciterId,
        verse: VerseKey,
    ) -> Result<Url, ResolveError> {
        self.calls.lock().unwrap().push((reciter, verse));
        let delay = self.delays.lock().unwrap().get(&verse).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self.failing.lock().unwrap().contains(&verse);
        if failing {
            return Err(ResolveError::NotFound(verse.to_string()));
        }
        Ok(verse_url(reciter, verse))
    }

    async fn resolve_chapter(&self, reciter: ReciterId, surah: u8) -> Result<Url, ResolveError> {
        Ok(Url::parse(&format!("https://media.example/{reciter}/{surah:03}.mp3")).unwrap())
    }
}

pub fn verse_url(reciter: ReciterId, verse: VerseKey) -> Url {
    Url::parse(&format!(
        "https://media.example/{reciter}/{:03}{:03}.mp3",
        verse.surah(),
        verse.ayah()
    ))
    .unwrap()
}

// ===== Media =====

#[derive(Debug)]
pub struct FakeMedia {
    url: Url,
    refuse: Arc<AtomicBool>,
    playing: AtomicBool,
    plays: AtomicU32,
    restarts: AtomicU32,
    position_ms: AtomicU64,
}

impl FakeMedia {
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub fn plays(&self) -> u32 {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn restarts(&self) -> u32 {
        self.restarts.load(Ordering::SeqCst)
    }

    pub fn seek_ms(&self, ms: u64) {
        self.position_ms.store(ms, Ordering::SeqCst);
    }
}

impl MediaHandle for FakeMedia {
    fn play(&self) -> noor_playback::Result<()> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(PlaybackError::media("autoplay blocked"));
        }
        self.plays.fetch_add(1, Ordering::SeqCst);
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    fn restart(&self) -> noor_playback::Result<()> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        self.seek_ms(0);
        Ok(())
    }

    fn position(&self) -> Duration {
        Duration::from_millis(self.position_ms.load(Ordering::SeqCst))
    }

    fn duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(10))
    }

    fn source_url(&self) -> &Url {
        &self.url
    }
}

#[derive(Default)]
pub struct FakeBackend {
    opened: Mutex<Vec<Arc<FakeMedia>>>,
    refuse_play: Arc<AtomicBool>,
}

impl FakeBackend {
    /// Make every handle refuse to play, as a blocked autoplay would
    pub fn refuse_play(&self, refuse: bool) {
        self.refuse_play.store(refuse, Ordering::SeqCst);
    }

    /// Most recently opened handle for `verse`
    pub fn media_for(&self, verse: VerseKey) -> Option<Arc<FakeMedia>> {
        let suffix = format!("/{:03}{:03}.mp3", verse.surah(), verse.ayah());
        self.opened
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.url.path().ends_with(&suffix))
            .cloned()
    }

    pub fn media_for_surah(&self, surah: u8) -> Option<Arc<FakeMedia>> {
        let suffix = format!("/{surah:03}.mp3");
        self.opened
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.url.path().ends_with(&suffix))
            .cloned()
    }
}

impl MediaBackend for FakeBackend {
    fn open(&self, url: &Url) -> noor_playback::Result<Arc<dyn MediaHandle>> {
        let media = Arc::new(FakeMedia {
            url: url.clone(),
            refuse: Arc::clone(&self.refuse_play),
            playing: AtomicBool::new(false),
            plays: AtomicU32::new(0),
            restarts: AtomicU32::new(0),
            position_ms: AtomicU64::new(0),
        });
        self.opened.lock().unwrap().push(Arc::clone(&media));
        Ok(media)
    }
}

// ===== View =====

#[derive(Default)]
pub struct RecordingView {
    scrolled: Mutex<Vec<VerseKey>>,
}

impl RecordingView {
    pub fn scrolled(&self) -> Vec<VerseKey> {
        self.scrolled.lock().unwrap().clone()
    }
}

impl ReadingView for RecordingView {
    fn scroll_into_view(&self, verse: VerseKey) {
        self.scrolled.lock().unwrap().push(verse);
    }
}

// ===== Harness =====

pub struct Harness {
    pub coordinator: Arc<AudioCoordinator>,
    pub resolver: Arc<FakeResolver>,
    pub backend: Arc<FakeBackend>,
    pub view: Arc<RecordingView>,
}

pub fn harness(loop_target: LoopTarget) -> Harness {
    let resolver = Arc::new(FakeResolver::default());
    let backend = Arc::new(FakeBackend::default());
    let view = Arc::new(RecordingView::default());
    let config = PlaybackConfig {
        loop_target,
        ..PlaybackConfig::default()
    };

    let coordinator = AudioCoordinator::new(
        resolver.clone(),
        backend.clone(),
        view.clone(),
        config,
    );

    Harness {
        coordinator,
        resolver,
        backend,
        view,
    }
}

impl Harness {
    /// Mount `first..=last` of a surah, each pointing at its successor
    pub fn mount_range(&self, surah: u8, first: u16, last: u16) {
        for ayah in first..=last {
            let verse = VerseKey::new(surah, ayah).unwrap();
            self.coordinator.mount(verse, verse.next_in_surah());
        }
    }

    pub fn media(&self, verse: VerseKey) -> Arc<FakeMedia> {
        self.backend
            .media_for(verse)
            .unwrap_or_else(|| panic!("no media opened for {verse}"))
    }
}

pub fn verse(s: &str) -> VerseKey {
    s.parse().unwrap()
}

/// Let spawned preload tasks run to completion
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn count_events(events: &[PlaybackEvent], pred: impl Fn(&PlaybackEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}
