//! Word of the Day and Kanji of the Day endpoints.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::models::kanji::Kanji;
use crate::models::verb::Verb;
use crate::models::JlptLevel;
use crate::{AppError, Result};

use super::AppState;

/// Optional `date` (`YYYY-MM-DD`, default today UTC) and `level`.
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    date: Option<String>,
    level: Option<String>,
}

impl DailyQuery {
    fn resolve(&self) -> Result<(NaiveDate, Option<JlptLevel>)> {
        Ok((
            parse_date(self.date.as_deref())?,
            self.level
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .map(str::parse::<JlptLevel>)
                .transpose()?,
        ))
    }
}

/// Parse an optional `YYYY-MM-DD` date, defaulting to today (UTC).
///
/// # Errors
///
/// Returns `AppError::BadRequest` on a malformed date.
pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("invalid date: {d}"))),
        None => Ok(Utc::now().date_naive()),
    }
}

/// `GET /api/word-of-the-day`
///
/// # Errors
///
/// 400 on invalid parameters, 404 when there are no words.
pub async fn word_of_the_day(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<DailyQuery>, QueryRejection>,
) -> Result<Json<Verb>> {
    let (date, level) = super::query(params)?.resolve()?;
    state
        .daily
        .word_of_the_day(date, level)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no words available".into()))
}

/// `GET /api/kanji-of-the-day`
///
/// # Errors
///
/// 400 on invalid parameters, 404 when there are no kanji.
pub async fn kanji_of_the_day(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<DailyQuery>, QueryRejection>,
) -> Result<Json<Kanji>> {
    let (date, level) = super::query(params)?.resolve()?;
    state
        .daily
        .kanji_of_the_day(date, level)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no kanji available".into()))
}
