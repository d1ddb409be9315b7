//! Grammar topic endpoints.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::models::grammar::GrammarTopic;
use crate::models::JlptLevel;
use crate::persistence::grammar_repo::GrammarRepo;
use crate::Result;

use super::AppState;

/// Optional `level` filter.
#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    level: Option<String>,
}

/// `GET /api/grammar-topics?level=N4`
///
/// # Errors
///
/// 400 on an invalid level.
pub async fn list_topics(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<TopicQuery>, QueryRejection>,
) -> Result<Json<Vec<GrammarTopic>>> {
    let params = super::query(params)?;
    let level = params
        .level
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .map(str::parse::<JlptLevel>)
        .transpose()?;
    let topics = GrammarRepo::new(Arc::clone(&state.db)).list(level).await?;
    Ok(Json(topics))
}

/// `GET /api/grammar-topics/{id}`
///
/// # Errors
///
/// 404 when the topic does not exist.
pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GrammarTopic>> {
    let topic = GrammarRepo::new(Arc::clone(&state.db)).get_by_id(&id).await?;
    Ok(Json(topic))
}
