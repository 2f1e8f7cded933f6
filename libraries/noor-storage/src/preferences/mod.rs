//! Reader state persistence
//!
//! Preferences are stored as key-value pairs with JSON-serialized values,
//! one row per key. Bookmarks, reading progress and settings are each a
//! single JSON document under their own key.
//!
//! # Example
//!
//! ```rust,no_run
//! use noor_storage::preferences;
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! preferences::set(pool, "theme", &serde_json::json!("dark")).await?;
//!
//! let theme = preferences::get(pool, "theme").await?;
//! assert_eq!(theme, Some(serde_json::json!("dark")));
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use noor_core::types::{keys, Bookmarks, ReaderSettings, ReadingProgress};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

/// Get a stored value, `None` when the key was never written
pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<serde_json::Value>> {
    let raw = sqlx::query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    match raw {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Store a value, replacing any previous one
pub async fn set(pool: &SqlitePool, key: &str, value: &serde_json::Value) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO preferences (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(raw)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a value, returning whether it existed
pub async fn delete(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM preferences WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Load a typed document, falling back to its default when absent
pub async fn load<T>(pool: &SqlitePool, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match get(pool, key).await? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(T::default()),
    }
}

/// Store a typed document
pub async fn save<T: Serialize>(pool: &SqlitePool, key: &str, document: &T) -> Result<()> {
    let value = serde_json::to_value(document)?;
    set(pool, key, &value).await
}

pub async fn load_bookmarks(pool: &SqlitePool) -> Result<Bookmarks> {
    load(pool, keys::BOOKMARKS).await
}

pub async fn save_bookmarks(pool: &SqlitePool, bookmarks: &Bookmarks) -> Result<()> {
    save(pool, keys::BOOKMARKS, bookmarks).await
}

pub async fn load_reading_progress(pool: &SqlitePool) -> Result<ReadingProgress> {
    load(pool, keys::READING_PROGRESS).await
}

pub async fn save_reading_progress(pool: &SqlitePool, progress: &ReadingProgress) -> Result<()> {
    save(pool, keys::READING_PROGRESS, progress).await
}

pub async fn load_settings(pool: &SqlitePool) -> Result<ReaderSettings> {
    load(pool, keys::SETTINGS).await
}

pub async fn save_settings(pool: &SqlitePool, settings: &ReaderSettings) -> Result<()> {
    save(pool, keys::SETTINGS, settings).await
}
