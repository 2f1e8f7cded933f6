use crate::ayahs;
use crate::error::Result;
use noor_core::types::{quran, Parah};
use sqlx::SqlitePool;
use tracing::warn;

/// The 30 parah start verses with their Arabic text
///
/// Starts whose verse is missing from the database are skipped.
pub async fn all(pool: &SqlitePool) -> Result<Vec<Parah>> {
    let mut parahs = Vec::with_capacity(usize::from(quran::PARAH_COUNT));

    for (parah_number, verse) in quran::parah_starts() {
        let ayah_id = verse.to_string();
        match ayahs::arabic_text(pool, &ayah_id).await? {
            Some(arabic_text) => parahs.push(Parah {
                parah_number: i64::from(parah_number),
                ayah_id,
                arabic_text,
            }),
            None => warn!("Parah {} start {} has no verse row", parah_number, ayah_id),
        }
    }

    Ok(parahs)
}
