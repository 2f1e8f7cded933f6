//! Noor Storage
//!
//! `SQLite` database layer for the Noor Quran reader.
//!
//! This crate holds the read-only Quran content (surahs, verses,
//! translations, mushaf pages) and the reader's persisted state
//! (bookmarks, reading progress, settings).
//!
//! # Architecture
//!
//! - **Read-only content**: content tables are populated out of band and only queried here
//! - **Vertical Slicing**: Each feature owns its own queries and logic
//! - **Documents for reader state**: preferences are JSON values keyed by name
//!
//! # Example
//!
//! ```rust,no_run
//! use noor_storage::{create_pool, run_migrations, QuranStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://noor.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = QuranStore::new(pool);
//! let surahs = store.surahs().await?;
//! let hits = store.search("mercy").await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod ayahs;
pub mod pages;
pub mod parahs;
pub mod rukus;
pub mod sajdas;
pub mod search;
pub mod surahs;

// Reader state
pub mod preferences;

pub use context::QuranStore;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://noor.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    debug!("Pool created");

    Ok(pool)
}
