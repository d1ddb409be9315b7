//! Google Calendar OAuth and reminder sync endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::google::SyncReport;
use crate::models::google::OAuthState;
use crate::models::JlptLevel;
use crate::persistence::oauth_state_repo::OAuthStateRepo;
use crate::{AppError, Result};

use super::AppState;

/// `userId` parameter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    user_id: Option<String>,
}

/// Parameters Google appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Body of `POST /api/google-calendar/sync`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncBody {
    user_id: Option<String>,
    date: Option<String>,
    level: Option<JlptLevel>,
    #[serde(default)]
    create_tasks: bool,
}

/// Authorization URL response.
#[derive(Debug, Serialize)]
pub struct AuthUrlResponse {
    /// Consent-screen URL to redirect the user to.
    pub url: String,
}

/// Connection status response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Whether tokens are stored for the user.
    pub connected: bool,
    /// Current access-token expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Callback success response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedResponse {
    /// Always `true`.
    pub connected: bool,
    /// User the tokens were stored for.
    pub user_id: String,
}

/// `GET /api/google-calendar/auth?userId`
///
/// # Errors
///
/// 400 when `userId` is missing; 500 when Google is not configured.
pub async fn auth_url(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<AuthUrlResponse>> {
    let params = super::query(params)?;
    let user_id = super::required(params.user_id.as_deref(), "userId")?;

    let pending = OAuthState::new(user_id.to_owned());
    let url = state.oauth.authorization_url(&pending.state)?;
    OAuthStateRepo::new(Arc::clone(&state.db))
        .insert(&pending)
        .await?;
    info!(user_id, "google authorization started");
    Ok(Json(AuthUrlResponse { url }))
}

/// `GET /api/google-calendar/callback?code&state`
///
/// # Errors
///
/// 400 when the user denied access, or the state is unknown or expired.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Json<ConnectedResponse>> {
    let params = super::query(params)?;
    if let Some(err) = params.error.as_deref() {
        warn!(error = err, "google authorization denied");
        return Err(AppError::BadRequest(format!("authorization denied: {err}")));
    }
    let code = super::required(params.code.as_deref(), "code")?;
    let state_param = super::required(params.state.as_deref(), "state")?;

    let pending = OAuthStateRepo::new(Arc::clone(&state.db))
        .take(state_param)
        .await?
        .ok_or_else(|| AppError::BadRequest("unknown authorization state".into()))?;
    let ttl = Duration::minutes(i64::from(state.config.google.state_ttl_minutes));
    if pending.is_expired(Utc::now(), ttl) {
        return Err(AppError::BadRequest("authorization state expired".into()));
    }

    let response = state.oauth.exchange_code(code).await?;
    let token = state.tokens.store_exchange(&pending.user_id, response).await?;
    Ok(Json(ConnectedResponse {
        connected: true,
        user_id: token.user_id,
    }))
}

/// `POST /api/google-calendar/sync` with `{userId, date?, level?, createTasks?}`.
///
/// # Errors
///
/// 400 on invalid input, 401 when the account is not connected, 404 when
/// there is nothing to sync.
pub async fn sync(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<SyncReport>> {
    let body: SyncBody = super::json_body(&body)?;
    let user_id = super::required(body.user_id.as_deref(), "userId")?;
    let date = super::daily::parse_date(body.date.as_deref())?;
    let report = state
        .reminders
        .sync(user_id, date, body.level, body.create_tasks)
        .await?;
    Ok(Json(report))
}

/// `GET /api/google-calendar/status?userId`
///
/// # Errors
///
/// 400 when `userId` is missing.
pub async fn status(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<StatusResponse>> {
    let params = super::query(params)?;
    let user_id = super::required(params.user_id.as_deref(), "userId")?;
    let token = state.tokens.status(user_id).await?;
    Ok(Json(StatusResponse {
        connected: token.is_some(),
        expires_at: token.map(|t| t.expires_at),
    }))
}

/// `DELETE /api/google-calendar/disconnect?userId`
///
/// # Errors
///
/// 400 when `userId` is missing, 404 when not connected.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<UserQuery>, QueryRejection>,
) -> Result<StatusCode> {
    let params = super::query(params)?;
    let user_id = super::required(params.user_id.as_deref(), "userId")?;
    state.tokens.disconnect(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
