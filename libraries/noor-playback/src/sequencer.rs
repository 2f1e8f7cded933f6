//! Loop-then-advance decision on natural end of media

use crate::session::VerseSession;
use crate::types::SessionState;
use noor_core::{LoopTarget, VerseKey};
use serde::{Deserialize, Serialize};

/// What to do after a verse finished playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CompletionDecision {
    /// Rewind and play the same handle again
    Replay { iteration: u32 },
    /// Loop target reached; hand off to `next` if there is one
    Advance { next: Option<VerseKey> },
    /// Stale or duplicate end signal
    Ignore,
}

/// Decide how a session continues after its media ended
///
/// `target` is read at each call, so changing the loop target mid-loop
/// applies from the next completion on. If the new target is already below
/// the completed count, that next completion advances.
///
/// Only a playing session counts a completion, and the advance fires at
/// most once per completion sequence.
pub fn on_completion(session: &mut VerseSession, target: LoopTarget) -> CompletionDecision {
    if session.state() != SessionState::Playing || session.has_advanced() {
        return CompletionDecision::Ignore;
    }

    let completed = session.record_completion();
    if target.allows_another(completed) {
        return CompletionDecision::Replay {
            iteration: completed,
        };
    }

    if session.mark_advanced() {
        CompletionDecision::Advance {
            next: session.next(),
        }
    } else {
        CompletionDecision::Ignore
    }
}
