/// Reader preferences
use super::ids::ReciterId;
use super::loop_target::LoopTarget;
use serde::{Deserialize, Serialize};

/// Keys under which reader state is persisted
pub mod keys {
    pub const BOOKMARKS: &str = "bookmarks";
    pub const READING_PROGRESS: &str = "readingProgress";
    pub const SETTINGS: &str = "settings";
    pub const RECITATION_ID: &str = "recitationId";
    pub const DISABLE_AUDIO_PLAYER: &str = "disableAudioPlayer";
    pub const AYAH_LOOP_COUNT: &str = "ayahLoopCount";
    pub const ACTIVE_TAB: &str = "activeTab";
    pub const THEME: &str = "theme";
    pub const CONFIRM_BEFORE_REMOVE: &str = "confirmBeforeRemove";
}

/// Smallest font size the size controls go down to
pub const MIN_FONT_SIZE: u16 = 12;

/// Colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Script whose font size can be adjusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Arabic,
    Urdu,
    English,
    Gujarati,
    Hindi,
}

/// Font size in pixels per script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub arabic: u16,
    pub urdu: u16,
    pub english: u16,
    pub gujarati: u16,
    pub hindi: u16,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            arabic: 24,
            urdu: 18,
            english: 16,
            gujarati: 16,
            hindi: 16,
        }
    }
}

impl FontSizes {
    pub fn get(&self, script: Script) -> u16 {
        match script {
            Script::Arabic => self.arabic,
            Script::Urdu => self.urdu,
            Script::English => self.english,
            Script::Gujarati => self.gujarati,
            Script::Hindi => self.hindi,
        }
    }

    fn slot(&mut self, script: Script) -> &mut u16 {
        match script {
            Script::Arabic => &mut self.arabic,
            Script::Urdu => &mut self.urdu,
            Script::English => &mut self.english,
            Script::Gujarati => &mut self.gujarati,
            Script::Hindi => &mut self.hindi,
        }
    }

    pub fn increase(&mut self, script: Script) -> u16 {
        let slot = self.slot(script);
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Shrink by one pixel, never below [`MIN_FONT_SIZE`]
    pub fn decrease(&mut self, script: Script) -> u16 {
        let slot = self.slot(script);
        *slot = slot.saturating_sub(1).max(MIN_FONT_SIZE);
        *slot
    }

    pub fn reset(&mut self, script: Script) -> u16 {
        let default = FontSizes::default().get(script);
        *self.slot(script) = default;
        default
    }
}

/// Reader preferences persisted between sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderSettings {
    pub recitation_id: ReciterId,
    pub disable_audio_player: bool,
    pub ayah_loop_count: LoopTarget,
    pub active_tab: String,
    pub theme: Theme,
    pub font_sizes: FontSizes,
    pub confirm_before_remove: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            recitation_id: ReciterId::default(),
            disable_audio_player: false,
            ayah_loop_count: LoopTarget::default(),
            active_tab: "translation".to_string(),
            theme: Theme::default(),
            font_sizes: FontSizes::default(),
            confirm_before_remove: true,
        }
    }
}
