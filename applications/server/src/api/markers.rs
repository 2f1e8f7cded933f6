/// Sajda and parah marker API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use noor_core::types::{Parah, Sajda};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SajdasResponse {
    pub sajdas: Vec<Sajda>,
}

#[derive(Debug, Serialize)]
pub struct ParahsResponse {
    pub parahs: Vec<Parah>,
}

/// GET /api/sajdas
pub async fn list_sajdas(State(app_state): State<AppState>) -> Result<Json<SajdasResponse>> {
    let sajdas = app_state.store.sajdas().await?;
    Ok(Json(SajdasResponse { sajdas }))
}

/// GET /api/parahs - first verse of each parah
pub async fn list_parahs(State(app_state): State<AppState>) -> Result<Json<ParahsResponse>> {
    let parahs = app_state.store.parahs().await?;
    Ok(Json(ParahsResponse { parahs }))
}
