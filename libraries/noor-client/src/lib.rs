//! Noor Client
//!
//! HTTP clients for the Noor Quran reader.
//!
//! # Features
//!
//! - **Recitations**: resolve verse and full-surah audio URLs, list reciters
//! - **Reader**: typed access to every content endpoint of noor-server
//! - **Audio resolution**: [`NoorClient`] implements [`noor_core::AudioResolver`]
//!
//! # Example
//!
//! ```no_run
//! use noor_client::{ClientConfig, NoorClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NoorClient::new(ClientConfig::default())?;
//!
//!     let hits = client.reader().search("mercy").await?;
//!     println!("Found {} verses", hits.len());
//!
//!     let reciters = client.recitations().list().await?;
//!     for reciter in reciters {
//!         println!("{}: {}", reciter.id, reciter.label());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod reader;
mod recitation;
mod types;

// Re-export main types
pub use client::NoorClient;
pub use error::{ClientError, Result};
pub use types::{
    ClientConfig, Recitation, DEFAULT_API_URL, DEFAULT_MEDIA_HOST, DEFAULT_QURAN_API_URL,
    HIDDEN_RECITATIONS,
};

// Re-export sub-clients for direct use if needed
pub use reader::ReaderClient;
pub use recitation::RecitationClient;
