/// Search API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use noor_core::types::SearchHit;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// GET /api/search?query=
///
/// A missing or blank query answers an empty array.
pub async fn search(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>> {
    let Some(text) = query.query.filter(|q| !q.trim().is_empty()) else {
        return Ok(Json(Vec::new()));
    };

    let hits = app_state.store.search(&text).await?;
    Ok(Json(hits))
}
