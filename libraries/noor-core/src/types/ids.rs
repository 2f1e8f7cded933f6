/// Identifier types for verses and reciters
use super::quran::{verse_count, SURAH_COUNT};
use crate::error::{NoorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verse identifier, written `surah:ayah` (e.g. `2:255`)
///
/// A `VerseKey` always points at a verse that exists: the surah is in
/// 1..=114 and the ayah is within that surah's verse count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseKey {
    surah: u8,
    ayah: u16,
}

impl VerseKey {
    /// Create a verse key, validating it against the surah's length
    pub fn new(surah: u8, ayah: u16) -> Result<Self> {
        let count = verse_count(surah).ok_or_else(|| {
            NoorError::InvalidVerseKey(format!(
                "{}:{} (surah must be 1-{})",
                surah, ayah, SURAH_COUNT
            ))
        })?;

        if ayah == 0 || ayah > count {
            return Err(NoorError::InvalidVerseKey(format!(
                "{}:{} (surah {} has {} ayahs)",
                surah, ayah, surah, count
            )));
        }

        Ok(Self { surah, ayah })
    }

    /// Parse a `surah:ayah` string
    pub fn parse(s: &str) -> Result<Self> {
        let (surah, ayah) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| NoorError::InvalidVerseKey(s.to_string()))?;

        let surah: u8 = surah
            .parse()
            .map_err(|_| NoorError::InvalidVerseKey(s.to_string()))?;
        let ayah: u16 = ayah
            .parse()
            .map_err(|_| NoorError::InvalidVerseKey(s.to_string()))?;

        Self::new(surah, ayah)
    }

    /// Surah number (1-114)
    pub fn surah(&self) -> u8 {
        self.surah
    }

    /// Ayah number within the surah
    pub fn ayah(&self) -> u16 {
        self.ayah
    }

    /// Following verse in the same surah, `None` at the end of the surah
    pub fn next_in_surah(&self) -> Option<Self> {
        Self::new(self.surah, self.ayah + 1).ok()
    }

    /// Preceding verse in the same surah, `None` at its first verse
    pub fn previous_in_surah(&self) -> Option<Self> {
        if self.ayah <= 1 {
            return None;
        }
        Self::new(self.surah, self.ayah - 1).ok()
    }

    /// Whether this is the last verse of its surah
    pub fn is_last_in_surah(&self) -> bool {
        self.next_in_surah().is_none()
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayah)
    }
}

impl FromStr for VerseKey {
    type Err = NoorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VerseKey {
    type Error = NoorError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<VerseKey> for String {
    fn from(key: VerseKey) -> Self {
        key.to_string()
    }
}

/// Recitation identifier (a reciter and recording style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ReciterId(u32);

impl ReciterId {
    /// Recitation selected when the reader has not chosen one
    pub const DEFAULT: ReciterId = ReciterId(7);

    /// Create a reciter id; zero is rejected
    pub fn new(id: u32) -> Result<Self> {
        if id == 0 {
            return Err(NoorError::InvalidReciter("0".to_string()));
        }
        Ok(Self(id))
    }

    /// Get the numeric id
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for ReciterId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ReciterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReciterId {
    type Err = NoorError;

    fn from_str(s: &str) -> Result<Self> {
        let id: u32 = s
            .trim()
            .parse()
            .map_err(|_| NoorError::InvalidReciter(s.to_string()))?;
        Self::new(id)
    }
}

impl TryFrom<u32> for ReciterId {
    type Error = NoorError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ReciterId> for u32 {
    fn from(id: ReciterId) -> Self {
        id.0
    }
}
