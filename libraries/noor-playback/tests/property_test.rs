//! Property-based tests for the coordinator
//!
//! Random sequences of reader actions must keep playback single-stream and
//! keep the preload cache consistent with the active reciter.

mod common;

use common::{harness, settle};
use noor_core::{LoopTarget, ReciterId, VerseKey};
use noor_playback::SessionState;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Toggle(u16),
    Ended(u16),
    Surah,
    SwitchReciter(u32),
    Settle,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (1u16..=7).prop_map(Action::Toggle),
        3 => (1u16..=7).prop_map(Action::Ended),
        1 => Just(Action::Surah),
        1 => (1u32..=3).prop_map(Action::SwitchReciter),
        2 => Just(Action::Settle),
    ]
}

fn fatihah(ayah: u16) -> VerseKey {
    VerseKey::new(1, ayah).unwrap()
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: at most one stream plays, and it is the one the registry reports
    #[test]
    fn playback_is_single_stream(
        actions in prop::collection::vec(action(), 1..40),
        target in 1u32..=3,
    ) {
        paused_runtime().block_on(async {
            let h = harness(LoopTarget::Times(target));
            h.mount_range(1, 1, 7);

            for action in actions {
                match action {
                    Action::Toggle(ayah) => {
                        let _ = h.coordinator.toggle(fatihah(ayah)).await;
                    }
                    Action::Ended(ayah) => {
                        let _ = h.coordinator.on_media_ended(fatihah(ayah)).await;
                    }
                    Action::Surah => {
                        let _ = h.coordinator.play_surah(1).await;
                    }
                    Action::SwitchReciter(id) => {
                        h.coordinator.set_reciter(ReciterId::new(id).unwrap());
                    }
                    Action::Settle => settle().await,
                }

                let playing: Vec<VerseKey> = (1..=7)
                    .map(fatihah)
                    .filter(|&v| h.coordinator.state(v) == Some(SessionState::Playing))
                    .collect();
                let now = h.coordinator.now_playing();

                prop_assert!(playing.len() <= 1, "several verses playing: {playing:?}");
                prop_assert_eq!(playing.first().copied(), now.verse);
                prop_assert!(now.verse.is_none() || now.surah.is_none());

                let audible = (1..=7)
                    .filter_map(|a| h.backend.media_for(fatihah(a)))
                    .filter(|m| m.is_playing())
                    .count();
                prop_assert!(audible <= 1);
            }
            Ok(())
        })?;
    }

    /// Property: a reciter switch leaves nothing warm for the new reciter
    #[test]
    fn reciter_switch_empties_the_cache(
        warmed in prop::collection::btree_set(1u16..=7, 1..7),
        new_reciter in (1u32..=20).prop_filter("a different reciter", |id| *id != 7),
    ) {
        paused_runtime().block_on(async {
            let h = harness(LoopTarget::default());
            h.mount_range(1, 1, 7);

            for &ayah in &warmed {
                h.coordinator.preload(fatihah(ayah));
            }
            settle().await;
            for &ayah in &warmed {
                prop_assert!(h.coordinator.is_warm(fatihah(ayah)));
            }

            h.coordinator.set_reciter(ReciterId::new(new_reciter).unwrap());
            settle().await;

            for ayah in 1..=7 {
                prop_assert!(!h.coordinator.is_warm(fatihah(ayah)));
            }
            Ok(())
        })?;
    }
}
