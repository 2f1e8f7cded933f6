//! Noor Server Library
//!
//! Read-only query API over the Quran content database: surahs, verses,
//! rukus, sajdas, parahs, mushaf pages and search.
//!
//! This library exposes the router and its parts for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router with every route nested under `/api`
pub fn create_router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(api::health::health))
        // Surahs and verses
        .route("/surahs", get(api::surahs::list_surahs))
        .route("/surah/:id", get(api::surahs::get_surah))
        .route("/ayahs/:surah_number", get(api::surahs::list_ayahs))
        .route("/reading", get(api::surahs::reading_index))
        // Divisions
        .route("/ruku", get(api::rukus::get_ruku))
        .route("/surah-rukus", get(api::rukus::surah_rukus))
        .route("/sajdas", get(api::markers::list_sajdas))
        .route("/parahs", get(api::markers::list_parahs))
        .route("/pages", get(api::pages::get_page))
        // Search
        .route("/search", get(api::search::search));

    Router::new()
        .nest("/api", routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
