/// Surah and verse API routes
use crate::{api::parse_number, error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use noor_core::types::{AyahSummary, ReadingEntry, Surah, SurahDetail};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SurahsResponse {
    pub surahs: Vec<Surah>,
}

#[derive(Debug, Serialize)]
pub struct AyahsResponse {
    pub ayahs: Vec<AyahSummary>,
}

#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub reading: Vec<ReadingEntry>,
}

/// GET /api/surahs
pub async fn list_surahs(State(app_state): State<AppState>) -> Result<Json<SurahsResponse>> {
    let surahs = app_state.store.surahs().await?;
    Ok(Json(SurahsResponse { surahs }))
}

/// GET /api/surah/:id
///
/// The surah row plus every verse with its translations and tafsir.
pub async fn get_surah(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<SurahDetail>> {
    let surah_id = parse_number(Some(&id), "surah id")?;
    let detail = app_state.store.surah_detail(surah_id).await?;
    Ok(Json(detail))
}

/// GET /api/ayahs/:surah_number
pub async fn list_ayahs(
    Path(surah_number): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<AyahsResponse>> {
    let surah_number = parse_number(Some(&surah_number), "surah number")?;
    let ayahs = app_state.store.ayahs(surah_number).await?;
    Ok(Json(AyahsResponse { ayahs }))
}

/// GET /api/reading
pub async fn reading_index(State(app_state): State<AppState>) -> Result<Json<ReadingResponse>> {
    let reading = app_state.store.reading_index().await?;
    Ok(Json(ReadingResponse { reading }))
}
