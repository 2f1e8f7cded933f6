/// Reading progress and daily streaks
use super::ids::VerseKey;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verses read per day before the daily goal counts as met
pub const DEFAULT_DAILY_GOAL: u32 = 10;

/// Reader's progress through the Quran
///
/// Missing fields fall back to their defaults when loading, so documents
/// written by older versions still parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingProgress {
    pub last_read: Option<LastRead>,
    /// Verse key to the day it was last read
    pub completed_ayahs: BTreeMap<String, NaiveDate>,
    pub total_read: u32,
    pub daily_goal: u32,
    pub streaks: Streaks,
}

/// Most recently read verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRead {
    pub surah_id: u8,
    pub ayah_id: u16,
    pub timestamp: DateTime<Utc>,
}

/// Consecutive-day reading streaks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
    pub last_read_date: Option<NaiveDate>,
}

impl Default for ReadingProgress {
    fn default() -> Self {
        Self {
            last_read: None,
            completed_ayahs: BTreeMap::new(),
            total_read: 0,
            daily_goal: DEFAULT_DAILY_GOAL,
            streaks: Streaks::default(),
        }
    }
}

impl ReadingProgress {
    /// Record that a verse was read at `now`
    ///
    /// The streak moves at most once per calendar day: reading on the day
    /// after the last reading day extends it, any longer gap restarts it
    /// at 1.
    pub fn record_read(&mut self, verse: VerseKey, now: DateTime<Utc>) {
        let today = now.date_naive();

        self.last_read = Some(LastRead {
            surah_id: verse.surah(),
            ayah_id: verse.ayah(),
            timestamp: now,
        });
        self.completed_ayahs.insert(verse.to_string(), today);
        self.total_read = u32::try_from(self.completed_ayahs.len()).unwrap_or(u32::MAX);

        if self.streaks.last_read_date == Some(today) {
            return;
        }

        let consecutive = match (self.streaks.last_read_date, today.pred_opt()) {
            (Some(last), Some(yesterday)) => last == yesterday,
            _ => false,
        };

        self.streaks.current = if consecutive {
            self.streaks.current.saturating_add(1)
        } else {
            1
        };
        self.streaks.longest = self.streaks.longest.max(self.streaks.current);
        self.streaks.last_read_date = Some(today);
    }

    /// Number of verses whose latest reading fell on `date`
    pub fn read_on(&self, date: NaiveDate) -> u32 {
        let count = self
            .completed_ayahs
            .values()
            .filter(|&&day| day == date)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    pub fn daily_goal_met(&self, date: NaiveDate) -> bool {
        self.read_on(date) >= self.daily_goal
    }

    pub fn is_completed(&self, verse: VerseKey) -> bool {
        self.completed_ayahs.contains_key(&verse.to_string())
    }
}
