//! HTTP API: shared state, router, and server loop.
//!
//! Every handler returns JSON. Failures go through [`AppError`]'s
//! `IntoResponse`, so callers always see `{"error": "..."}` with a 400,
//! 401, 404 or 500 status.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::routing::{delete, get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::GlobalConfig;
use crate::daily::DailyPicker;
use crate::drill::{RandomDrillGenerator, SentenceDrillGenerator};
use crate::google::{CalendarClient, OAuthClient, ReminderSync, TokenManager};
use crate::kanji::{KanjiApiClient, KanjiLookup};
use crate::persistence::db::Database;
use crate::persistence::token_repo::TokenRepo;
use crate::{AppError, Result};

pub mod daily;
pub mod drill;
pub mod google;
pub mod grammar;
pub mod kanji;
pub mod sentences;
pub mod topics;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration.
    pub config: Arc<GlobalConfig>,
    /// `SQLite` pool.
    pub db: Arc<Database>,
    /// Sentence drill generator.
    pub sentence_drills: SentenceDrillGenerator,
    /// Random conjugation drill generator.
    pub random_drills: RandomDrillGenerator,
    /// Cache-through kanji lookup.
    pub kanji: KanjiLookup,
    /// Word / Kanji of the Day selection.
    pub daily: DailyPicker,
    /// Google OAuth client.
    pub oauth: OAuthClient,
    /// Stored Google token access.
    pub tokens: TokenManager,
    /// Calendar / Tasks reminder sync.
    pub reminders: ReminderSync,
}

impl AppState {
    /// Wire every service over `db`, sharing one HTTP client.
    #[must_use]
    pub fn new(config: Arc<GlobalConfig>, db: Arc<Database>, http: reqwest::Client) -> Self {
        let max_attempts = config.drill.max_attempts;
        let oauth = OAuthClient::new(config.google.clone(), http.clone());
        let tokens = TokenManager::new(TokenRepo::new(Arc::clone(&db)), oauth.clone());
        let daily = DailyPicker::new(Arc::clone(&db));
        let calendar = CalendarClient::new(&config.google, http.clone());
        let kanji_client = KanjiApiClient::new(config.kanji_api.clone(), http);

        Self {
            sentence_drills: SentenceDrillGenerator::new(Arc::clone(&db), max_attempts),
            random_drills: RandomDrillGenerator::new(Arc::clone(&db), max_attempts),
            kanji: KanjiLookup::new(Arc::clone(&db), kanji_client),
            reminders: ReminderSync::new(tokens.clone(), calendar, daily.clone()),
            daily,
            oauth,
            tokens,
            config,
            db,
        }
    }
}

/// Handler for `GET /health`: returns 200 OK with a plain-text body.
async fn health() -> &'static str {
    "ok"
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/drill", get(drill::get_drill))
        .route("/api/validate-grammar", post(grammar::validate_grammar))
        .route("/api/grammar-topics", get(topics::list_topics))
        .route("/api/grammar-topics/{id}", get(topics::get_topic))
        .route("/api/kanji/{character}", get(kanji::get_kanji))
        .route("/api/word-of-the-day", get(daily::word_of_the_day))
        .route("/api/kanji-of-the-day", get(daily::kanji_of_the_day))
        .route("/api/example-sentences", get(sentences::search_sentences))
        .route(
            "/api/sentence-favorites",
            get(sentences::list_favorites)
                .post(sentences::add_favorite)
                .delete(sentences::remove_favorite),
        )
        .route("/api/google-calendar/auth", get(google::auth_url))
        .route("/api/google-calendar/callback", get(google::callback))
        .route("/api/google-calendar/sync", post(google::sync))
        .route("/api/google-calendar/status", get(google::status))
        .route("/api/google-calendar/disconnect", delete(google::disconnect))
        .with_state(state)
}

/// Bind `config.bind_addr()` and serve until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Config` if the server fails to bind or crashes.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let bind = state.config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind HTTP on {bind}: {err}")))?;

    info!(%bind, "starting HTTP API");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Config(format!("HTTP server error: {err}")))?;

    info!("HTTP API shut down");
    Ok(())
}

/// Unwrap a query extraction, turning rejections into JSON 400s.
fn query<T>(extracted: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    extracted
        .map(|Query(value)| value)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Parse a JSON request body, turning failures into 400s.
fn json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| AppError::BadRequest(format!("invalid request body: {err}")))
}

/// Reject a missing or blank required parameter.
fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{name} is required"))),
    }
}
