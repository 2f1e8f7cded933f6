//! Platform media seam
//!
//! The coordinator never decodes audio itself. The host (browser bridge,
//! desktop output) opens a playable handle for a resolved URL and reports
//! natural end of media back through `AudioCoordinator::on_media_ended`.

use crate::error::Result;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Opens media handles for resolved audio URLs
pub trait MediaBackend: Send + Sync {
    /// Create a handle for `url`
    ///
    /// Opening must not start playback; the handle stays silent until
    /// [`MediaHandle::play`] is called.
    fn open(&self, url: &Url) -> Result<Arc<dyn MediaHandle>>;
}

/// One loaded audio source
///
/// Handles are shared between the preload cache, the session that owns
/// them and the playback registry, so every method takes `&self`.
pub trait MediaHandle: Send + Sync + fmt::Debug {
    /// Start or resume playback
    ///
    /// May fail, e.g. when the platform refuses to autoplay.
    fn play(&self) -> Result<()>;

    /// Pause, keeping the current position
    fn pause(&self);

    /// Rewind to the start without changing play state
    fn restart(&self) -> Result<()>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total length, `None` until the platform knows it
    fn duration(&self) -> Option<Duration>;

    /// URL the handle was opened with
    fn source_url(&self) -> &Url;
}

/// Progress of a handle as a percentage in `0.0..=100.0`
pub fn progress_percent(handle: &dyn MediaHandle) -> f32 {
    match handle.duration() {
        Some(total) if !total.is_zero() => {
            let ratio = handle.position().as_secs_f32() / total.as_secs_f32();
            (ratio * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Whether two shared handles are the same instance
pub fn same_handle(a: &Arc<dyn MediaHandle>, b: &Arc<dyn MediaHandle>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}
