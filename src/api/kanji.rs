//! `GET /api/kanji/{character}`

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::models::kanji::Kanji;
use crate::Result;

use super::AppState;

/// Look up one kanji, caching API results.
///
/// # Errors
///
/// 400 unless the path is one character; 404 when unknown.
pub async fn get_kanji(
    State(state): State<Arc<AppState>>,
    Path(character): Path<String>,
) -> Result<Json<Kanji>> {
    Ok(Json(state.kanji.get(&character).await?))
}
