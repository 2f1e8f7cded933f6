/// Static structure of the Quran (surah lengths, parah boundaries)
use super::ids::VerseKey;

/// Number of surahs
pub const SURAH_COUNT: u8 = 114;

/// Number of parahs (juz)
pub const PARAH_COUNT: u8 = 30;

/// Verse count of each surah, indexed by `surah - 1`
const VERSE_COUNTS: [u16; SURAH_COUNT as usize] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, 123, 111, 43, 52, 99, 128, 111, 110, 98, 135,
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, 34, 30, 73, 54, 45, 83, 182, 88, 75, 85, 54, 53,
    89, 59, 37, 35, 38, 29, 18, 45, 60, 49, 62, 55, 78, 96, 29, 22, 24, 13, 14, 11, 11, 18, 12,
    12, 30, 52, 52, 44, 28, 28, 20, 56, 40, 31, 50, 40, 46, 42, 29, 19, 36, 25, 22, 17, 19, 26,
    30, 20, 15, 21, 11, 8, 8, 19, 5, 8, 8, 11, 11, 8, 3, 9, 5, 4, 7, 3, 6, 3, 5, 4, 5, 6,
];

/// First verse of each parah, indexed by `parah - 1`
const PARAH_STARTS: [(u8, u16); PARAH_COUNT as usize] = [
    (2, 1),
    (2, 142),
    (2, 253),
    (3, 92),
    (4, 24),
    (4, 148),
    (5, 83),
    (6, 111),
    (7, 88),
    (8, 41),
    (9, 94),
    (11, 6),
    (12, 53),
    (15, 2),
    (17, 1),
    (18, 75),
    (21, 1),
    (23, 1),
    (25, 21),
    (27, 60),
    (29, 45),
    (33, 31),
    (36, 22),
    (39, 32),
    (41, 47),
    (46, 1),
    (51, 31),
    (58, 1),
    (67, 1),
    (78, 1),
];

/// Number of verses in a surah, `None` outside 1..=114
pub fn verse_count(surah: u8) -> Option<u16> {
    if surah == 0 {
        return None;
    }
    VERSE_COUNTS.get(usize::from(surah) - 1).copied()
}

/// Total number of verses in the Quran
pub fn total_verses() -> u32 {
    VERSE_COUNTS.iter().map(|&c| u32::from(c)).sum()
}

/// Verse at which a parah begins
///
/// Parah 1 is listed as starting at 2:1, matching the reading index the
/// content server publishes.
pub fn parah_start(parah: u8) -> Option<VerseKey> {
    if parah == 0 {
        return None;
    }
    let (surah, ayah) = *PARAH_STARTS.get(usize::from(parah) - 1)?;
    VerseKey::new(surah, ayah).ok()
}

/// All parah start verses in order, paired with their parah number
pub fn parah_starts() -> impl Iterator<Item = (u8, VerseKey)> {
    (1..=PARAH_COUNT).filter_map(|p| parah_start(p).map(|v| (p, v)))
}

/// Parah containing the given verse
///
/// Surah 1 and the first verses of surah 2 precede the first listed start
/// and belong to parah 1.
pub fn parah_of(verse: VerseKey) -> u8 {
    let position = (verse.surah(), verse.ayah());
    PARAH_STARTS
        .iter()
        .rposition(|&start| start <= position)
        .map_or(1, |idx| idx as u8 + 1)
}
