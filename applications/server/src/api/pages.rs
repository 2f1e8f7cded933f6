/// Mushaf page API routes
use crate::{api::parse_number, error::Result, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use noor_core::types::PageLine;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

/// GET /api/pages?page= (defaults to page 1)
pub async fn get_page(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PageLine>>> {
    let page_number = match query.page.as_deref() {
        None | Some("") => 1,
        raw => parse_number(raw, "page number")?,
    };

    let lines = app_state.store.page(page_number).await?;
    Ok(Json(lines))
}
