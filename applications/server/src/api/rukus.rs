/// Ruku API routes
use crate::{api::parse_number, error::Result, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use noor_core::types::{RukuDetail, RukuRange};
use serde::Deserialize;

/// Raw query values, parsed with `parse_number`
#[derive(Debug, Deserialize)]
pub struct RukuQuery {
    #[serde(default)]
    pub surah: Option<String>,
    #[serde(default)]
    pub ruku: Option<String>,
}

/// GET /api/ruku?surah=&ruku=
pub async fn get_ruku(
    State(app_state): State<AppState>,
    Query(query): Query<RukuQuery>,
) -> Result<Json<RukuDetail>> {
    let surah_id = parse_number(query.surah.as_deref(), "surah or ruku number")?;
    let ruku_number = parse_number(query.ruku.as_deref(), "surah or ruku number")?;

    let detail = app_state.store.ruku(surah_id, ruku_number).await?;
    Ok(Json(detail))
}

/// GET /api/surah-rukus?surah=
pub async fn surah_rukus(
    State(app_state): State<AppState>,
    Query(query): Query<RukuQuery>,
) -> Result<Json<Vec<RukuRange>>> {
    let surah_id = parse_number(query.surah.as_deref(), "surah number")?;
    let rukus = app_state.store.surah_rukus(surah_id).await?;
    Ok(Json(rukus))
}
