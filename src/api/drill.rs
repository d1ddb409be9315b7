//! `GET /api/drill`: sentence-based multiple-choice drill.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::drill::DrillRequest;
use crate::models::drill::DrillQuestion;
use crate::models::{JlptLevel, WordType};
use crate::{AppError, Result};

use super::AppState;

/// Query parameters: `level`, `wordTypes` (comma separated), `count`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillQuery {
    level: Option<String>,
    word_types: Option<String>,
    count: Option<usize>,
}

/// Drill response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillResponse {
    /// Generated questions; may be fewer than requested.
    pub questions: Vec<DrillQuestion>,
    /// Number of questions returned.
    pub count: usize,
}

/// Generate a sentence drill.
///
/// # Errors
///
/// 400 on a missing or invalid level, word type, or count.
pub async fn get_drill(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<DrillQuery>, QueryRejection>,
) -> Result<Json<DrillResponse>> {
    let params = super::query(params)?;
    let level: JlptLevel = super::required(params.level.as_deref(), "level")?.parse()?;
    let word_types = WordType::parse_list(params.word_types.as_deref().unwrap_or_default())?;
    let count = params.count.unwrap_or(state.config.drill.default_count);
    if count == 0 || count > state.config.drill.max_count {
        return Err(AppError::BadRequest(format!(
            "count must be between 1 and {}",
            state.config.drill.max_count
        )));
    }

    let questions = state
        .sentence_drills
        .generate(&DrillRequest {
            level,
            word_types,
            count,
        })
        .await?;
    Ok(Json(DrillResponse {
        count: questions.len(),
        questions,
    }))
}
