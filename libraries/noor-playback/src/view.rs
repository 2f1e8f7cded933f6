//! Reading view seam

use noor_core::VerseKey;

/// The rendering layer, as far as playback needs it
///
/// Handing off to the next verse scrolls it into view before playback
/// starts there.
pub trait ReadingView: Send + Sync {
    fn scroll_into_view(&self, verse: VerseKey);
}

/// View that ignores scroll requests, for headless use
#[derive(Debug, Default, Clone, Copy)]
pub struct NoView;

impl ReadingView for NoView {
    fn scroll_into_view(&self, _verse: VerseKey) {}
}
