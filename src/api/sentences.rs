//! Example sentence search and per-user favorites.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::models::sentence::{ExampleSentence, FavoriteWithSentence, SentenceFavorite};
use crate::models::JlptLevel;
use crate::persistence::favorite_repo::FavoriteRepo;
use crate::persistence::sentence_repo::SentenceRepo;
use crate::{AppError, Result};

use super::AppState;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

/// Search parameters.
#[derive(Debug, Deserialize)]
pub struct SentenceQuery {
    word: Option<String>,
    level: Option<String>,
    limit: Option<u32>,
}

/// `userId` parameter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    user_id: Option<String>,
}

/// `userId` + `sentenceId`, as query string or JSON body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteParams {
    user_id: Option<String>,
    sentence_id: Option<String>,
}

/// `GET /api/example-sentences?word&level&limit`
///
/// # Errors
///
/// 400 on an invalid level or limit.
pub async fn search_sentences(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<SentenceQuery>, QueryRejection>,
) -> Result<Json<Vec<ExampleSentence>>> {
    let params = super::query(params)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }
    let level = params
        .level
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .map(str::parse::<JlptLevel>)
        .transpose()?;
    let word = params.word.as_deref().map(str::trim).filter(|w| !w.is_empty());

    let sentences = SentenceRepo::new(Arc::clone(&state.db))
        .search(word, level, limit)
        .await?;
    Ok(Json(sentences))
}

/// `GET /api/sentence-favorites?userId`
///
/// # Errors
///
/// 400 when `userId` is missing.
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<FavoriteWithSentence>>> {
    let params = super::query(params)?;
    let user_id = super::required(params.user_id.as_deref(), "userId")?;
    let favorites = FavoriteRepo::new(Arc::clone(&state.db))
        .list_for_user(user_id)
        .await?;
    Ok(Json(favorites))
}

/// `POST /api/sentence-favorites` with `{userId, sentenceId}`.
///
/// # Errors
///
/// 400 on missing fields, 404 when the sentence does not exist.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SentenceFavorite>)> {
    let params: FavoriteParams = super::json_body(&body)?;
    let user_id = super::required(params.user_id.as_deref(), "userId")?;
    let sentence_id = super::required(params.sentence_id.as_deref(), "sentenceId")?;
    let favorite = FavoriteRepo::new(Arc::clone(&state.db))
        .add(user_id, sentence_id)
        .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// `DELETE /api/sentence-favorites?userId&sentenceId`
///
/// # Errors
///
/// 400 on missing parameters, 404 when the favorite does not exist.
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<FavoriteParams>, QueryRejection>,
) -> Result<StatusCode> {
    let params = super::query(params)?;
    let user_id = super::required(params.user_id.as_deref(), "userId")?;
    let sentence_id = super::required(params.sentence_id.as_deref(), "sentenceId")?;
    FavoriteRepo::new(Arc::clone(&state.db))
        .remove(user_id, sentence_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
