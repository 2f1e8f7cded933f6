//! Coordinator integration tests
//!
//! Play/pause, preloading, mutual exclusion, cancellation, reciter changes
//! and failure handling, driven through the public API with a paused clock.

mod common;

use common::{count_events, harness, settle, verse};
use noor_core::{LoopTarget, ReciterId};
use noor_playback::{NowPlaying, PlaybackError, PlaybackEvent, SessionState};
use std::time::Duration;
use tokio::time::Instant;

// ===== Play / pause =====

#[tokio::test(start_paused = true)]
async fn toggle_fetches_plays_and_pauses() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    let v = verse("1:1");

    assert_eq!(h.coordinator.state(v), Some(SessionState::Idle));
    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Playing);
    assert!(h.media(v).is_playing());
    assert_eq!(h.coordinator.now_playing().verse, Some(v));
    assert!(h
        .coordinator
        .source_url(v)
        .unwrap()
        .path()
        .ends_with("/001001.mp3"));

    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Paused);
    assert!(!h.media(v).is_playing());
    assert!(h.coordinator.now_playing().is_idle());
}

#[tokio::test(start_paused = true)]
async fn resume_does_not_refetch() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    let v = verse("1:1");

    h.coordinator.toggle(v).await.unwrap();
    h.coordinator.toggle(v).await.unwrap();
    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Playing);

    assert_eq!(h.resolver.calls_for(v), 1);
    assert_eq!(h.media(v).plays(), 2);
}

#[tokio::test(start_paused = true)]
async fn pause_keeps_the_loop_count() {
    let h = harness(LoopTarget::Times(3));
    h.mount_range(1, 1, 2);
    let v = verse("1:1");

    h.coordinator.toggle(v).await.unwrap();
    h.coordinator.on_media_ended(v).await.unwrap();
    h.coordinator.toggle(v).await.unwrap();
    h.coordinator.toggle(v).await.unwrap();

    assert_eq!(h.coordinator.completed_iterations(v), Some(1));
}

#[tokio::test]
async fn unknown_verse_is_rejected() {
    let h = harness(LoopTarget::default());
    let err = h.coordinator.toggle(verse("9:1")).await.unwrap_err();
    assert_eq!(err, PlaybackError::UnknownVerse(verse("9:1")));
    assert!(h.coordinator.on_media_ended(verse("9:1")).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn state_changes_are_reported() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 1);
    let v = verse("1:1");
    h.coordinator.toggle(v).await.unwrap();

    let states: Vec<SessionState> = h
        .coordinator
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PlaybackEvent::StateChanged { verse, state } if verse == v => Some(state),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        [
            SessionState::Fetching,
            SessionState::Ready,
            SessionState::Playing
        ]
    );
    assert!(!h.coordinator.has_pending_events());
}

// ===== Preloading =====

#[tokio::test(start_paused = true)]
async fn playing_preloads_the_next_verse() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 3);

    h.coordinator.toggle(verse("1:1")).await.unwrap();
    settle().await;

    assert!(h.coordinator.is_warm(verse("1:2")));
    assert!(!h.coordinator.is_warm(verse("1:3")));
    let events = h.coordinator.drain_events();
    assert_eq!(
        count_events(&events, |e| matches!(e, PlaybackEvent::Preloaded { verse: v, .. } if *v == verse("1:2"))),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn warmed_handle_is_claimed_once() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 3);
    let v = verse("1:2");

    assert!(h.coordinator.preload(v));
    assert!(!h.coordinator.preload(v), "already in flight");
    settle().await;
    assert!(h.coordinator.is_warm(v));
    assert!(!h.coordinator.preload(v), "already warm");

    h.coordinator.toggle(v).await.unwrap();
    assert!(!h.coordinator.is_warm(v));
    assert_eq!(h.resolver.calls_for(v), 1);
    assert_eq!(h.coordinator.state(v), Some(SessionState::Playing));
}

#[tokio::test(start_paused = true)]
async fn preload_failure_leaves_the_verse_playable() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    h.resolver.fail(verse("1:2"));

    h.coordinator.toggle(verse("1:1")).await.unwrap();
    settle().await;
    assert!(!h.coordinator.is_warm(verse("1:2")));

    h.resolver.recover(verse("1:2"));
    assert!(h.coordinator.preload(verse("1:2")));
    settle().await;
    assert!(h.coordinator.is_warm(verse("1:2")));
}

// ===== Mutual exclusion =====

#[tokio::test(start_paused = true)]
async fn only_the_latest_verse_plays() {
    let h = harness(LoopTarget::default());
    h.mount_range(2, 1, 5);
    let verses: Vec<_> = (1..=5).map(|a| verse(&format!("2:{a}"))).collect();

    for (n, &current) in verses.iter().enumerate() {
        h.coordinator.play(current).await.unwrap();
        settle().await;

        assert_eq!(h.coordinator.now_playing().verse, Some(current));
        for &earlier in &verses[..n] {
            assert_eq!(h.coordinator.state(earlier), Some(SessionState::Paused));
            assert!(!h.media(earlier).is_playing());
        }
    }
}

#[tokio::test(start_paused = true)]
async fn verse_and_surah_playback_exclude_each_other() {
    let h = harness(LoopTarget::default());
    h.mount_range(36, 1, 2);
    let v = verse("36:1");

    h.coordinator.toggle(v).await.unwrap();
    h.coordinator.play_surah(36).await.unwrap();

    assert_eq!(
        h.coordinator.now_playing(),
        NowPlaying {
            verse: None,
            surah: Some(36)
        }
    );
    assert_eq!(h.coordinator.state(v), Some(SessionState::Paused));
    assert!(!h.media(v).is_playing());
    assert!(h.backend.media_for_surah(36).unwrap().is_playing());

    h.coordinator.drain_events();
    h.coordinator.toggle(v).await.unwrap();
    assert_eq!(h.coordinator.now_playing().surah, None);
    assert!(!h.backend.media_for_surah(36).unwrap().is_playing());
    let events = h.coordinator.drain_events();
    assert!(events.contains(&PlaybackEvent::SurahStopped { surah: 36 }));
}

#[tokio::test(start_paused = true)]
async fn surah_playback_validates_and_stops() {
    let h = harness(LoopTarget::default());

    assert_eq!(
        h.coordinator.play_surah(0).await,
        Err(PlaybackError::InvalidSurah(0))
    );
    assert_eq!(
        h.coordinator.play_surah(115).await,
        Err(PlaybackError::InvalidSurah(115))
    );

    h.coordinator.play_surah(112).await.unwrap();
    assert!(h.coordinator.stop_surah());
    assert!(!h.coordinator.stop_surah());
    assert!(h.coordinator.now_playing().is_idle());
    assert!(!h.backend.media_for_surah(112).unwrap().is_playing());
}

// ===== Cancellation =====

#[tokio::test(start_paused = true)]
async fn switching_verses_cancels_the_pending_resolution() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 4);
    let (a, b) = (verse("1:1"), verse("1:3"));
    h.resolver.delay(a, Duration::from_secs(5));

    let pending = tokio::spawn({
        let coordinator = h.coordinator.clone();
        async move { coordinator.toggle(a).await }
    });
    settle().await;
    assert_eq!(h.coordinator.state(a), Some(SessionState::Fetching));

    assert_eq!(h.coordinator.toggle(b).await.unwrap(), SessionState::Playing);
    assert_eq!(pending.await.unwrap(), Err(PlaybackError::Cancelled));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(h.coordinator.state(a), Some(SessionState::Idle));
    assert!(h.coordinator.source_url(a).is_none());
    assert_eq!(h.coordinator.state(b), Some(SessionState::Playing));
    assert_eq!(h.coordinator.now_playing().verse, Some(b));
}

#[tokio::test(start_paused = true)]
async fn toggling_while_fetching_cancels() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    let v = verse("1:1");
    h.resolver.delay(v, Duration::from_secs(3));

    let pending = tokio::spawn({
        let coordinator = h.coordinator.clone();
        async move { coordinator.toggle(v).await }
    });
    settle().await;

    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Idle);
    assert_eq!(pending.await.unwrap(), Err(PlaybackError::Cancelled));
    assert!(h.coordinator.now_playing().is_idle());
}

#[tokio::test(start_paused = true)]
async fn unmount_cancels_and_releases() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 3);
    let (fetching, playing) = (verse("1:1"), verse("1:3"));

    h.coordinator.toggle(playing).await.unwrap();
    assert!(h.coordinator.unmount(playing));
    assert!(!h.media(playing).is_playing());
    assert!(h.coordinator.now_playing().is_idle());

    h.resolver.delay(fetching, Duration::from_secs(3));
    let pending = tokio::spawn({
        let coordinator = h.coordinator.clone();
        async move { coordinator.toggle(fetching).await }
    });
    settle().await;
    assert!(h.coordinator.unmount(fetching));
    assert_eq!(pending.await.unwrap(), Err(PlaybackError::Cancelled));
    assert!(!h.coordinator.is_mounted(fetching));
    assert!(!h.coordinator.unmount(fetching));
}

#[tokio::test(start_paused = true)]
async fn stop_all_pauses_everything() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 3);
    h.coordinator.toggle(verse("1:1")).await.unwrap();

    h.resolver.delay(verse("1:3"), Duration::from_secs(3));
    let pending = tokio::spawn({
        let coordinator = h.coordinator.clone();
        async move { coordinator.play(verse("1:3")).await }
    });
    settle().await;

    h.coordinator.stop_all();
    assert_eq!(pending.await.unwrap(), Err(PlaybackError::Cancelled));
    assert!(h.coordinator.now_playing().is_idle());
    assert_eq!(h.coordinator.state(verse("1:1")), Some(SessionState::Paused));
    assert_eq!(h.coordinator.state(verse("1:3")), Some(SessionState::Idle));
}

// ===== Reciter =====

#[tokio::test(start_paused = true)]
async fn reciter_change_invalidates_everything() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 3);
    let v = verse("1:1");
    let other = ReciterId::new(3).unwrap();

    h.coordinator.toggle(v).await.unwrap();
    settle().await;
    assert!(h.coordinator.is_warm(verse("1:2")));

    assert!(h.coordinator.set_reciter(other));
    assert!(!h.coordinator.set_reciter(other));

    assert!(!h.coordinator.is_warm(verse("1:2")));
    assert_eq!(h.coordinator.state(v), Some(SessionState::Idle));
    assert!(h.coordinator.source_url(v).is_none());
    assert!(h.coordinator.now_playing().is_idle());
    assert!(!h.media(v).is_playing());
    assert!(h
        .coordinator
        .drain_events()
        .contains(&PlaybackEvent::ReciterChanged { reciter: other }));

    // Nothing restarts until the reader plays again
    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Playing);
    assert_eq!(
        h.resolver.reciters_for(v),
        [ReciterId::DEFAULT, other]
    );
}

#[tokio::test(start_paused = true)]
async fn late_preload_from_old_reciter_is_discarded() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 3);
    h.resolver.delay(verse("1:2"), Duration::from_secs(1));

    h.coordinator.toggle(verse("1:1")).await.unwrap();
    settle().await;
    h.coordinator.set_reciter(ReciterId::new(3).unwrap());
    h.coordinator.drain_events();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!h.coordinator.is_warm(verse("1:2")));
    let events = h.coordinator.drain_events();
    assert_eq!(
        count_events(&events, |e| matches!(e, PlaybackEvent::Preloaded { .. })),
        0
    );
}

// ===== Failures =====

#[tokio::test(start_paused = true)]
async fn resolution_failure_is_retryable() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    let v = verse("1:1");
    h.resolver.fail(v);

    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Error);
    assert!(h.coordinator.now_playing().is_idle());
    let events = h.coordinator.drain_events();
    assert_eq!(
        count_events(&events, |e| matches!(e, PlaybackEvent::Error { verse: Some(x), .. } if *x == v)),
        1
    );

    h.resolver.recover(v);
    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Playing);
    assert_eq!(h.resolver.calls_for(v), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_resolution_times_out() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    let v = verse("1:1");
    h.resolver.delay(v, Duration::from_secs(30));

    let started = Instant::now();
    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Error);
    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(10));
    assert!(waited < Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn refused_playback_reverts_to_ready() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    let v = verse("1:1");
    h.backend.refuse_play(true);

    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Ready);
    assert!(h.coordinator.now_playing().is_idle());
    assert!(h.coordinator.source_url(v).is_some());

    h.backend.refuse_play(false);
    assert_eq!(h.coordinator.toggle(v).await.unwrap(), SessionState::Playing);
    assert_eq!(h.resolver.calls_for(v), 1);
}

// ===== Progress =====

#[tokio::test(start_paused = true)]
async fn progress_is_sampled_while_playing() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 2);
    let v = verse("1:1");

    h.coordinator.toggle(v).await.unwrap();
    h.media(v).seek_ms(5_000);
    assert_eq!(h.coordinator.progress(v), Some(50.0));
    h.coordinator.drain_events();

    let sampler = h
        .coordinator
        .spawn_progress_sampler(h.coordinator.config().progress_interval);
    tokio::time::sleep(Duration::from_millis(600)).await;
    sampler.abort();

    let samples: Vec<f32> = h
        .coordinator
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PlaybackEvent::Progress { verse, percent } if verse == v => Some(percent),
            _ => None,
        })
        .collect();
    assert!(samples.len() >= 2);
    assert!(samples.iter().all(|&p| p == 50.0));
}

#[tokio::test(start_paused = true)]
async fn sampler_is_silent_when_nothing_plays() {
    let h = harness(LoopTarget::default());
    h.mount_range(1, 1, 1);

    let sampler = h.coordinator.spawn_progress_sampler(Duration::from_millis(250));
    tokio::time::sleep(Duration::from_secs(1)).await;
    sampler.abort();

    assert!(!h.coordinator.has_pending_events());
}
