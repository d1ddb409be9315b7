//! Stored-token access with refresh-before-expiry.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::models::google::GoogleToken;
use crate::persistence::token_repo::TokenRepo;
use crate::{AppError, Result};

use super::oauth::{OAuthClient, TokenResponse};

/// Tokens expiring within this window are refreshed before use.
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// Hands out usable access tokens, refreshing and persisting them as needed.
///
/// The expiry check and the refresh are not atomic: two concurrent callers
/// may both refresh. Each writes a valid token, so the last write wins.
#[derive(Clone)]
pub struct TokenManager {
    repo: TokenRepo,
    oauth: OAuthClient,
}

impl TokenManager {
    /// Create a manager over `repo` refreshing through `oauth`.
    #[must_use]
    pub fn new(repo: TokenRepo, oauth: OAuthClient) -> Self {
        Self { repo, oauth }
    }

    /// Persist the tokens returned by an authorization-code exchange.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upstream` if Google omitted the refresh token and
    /// none is stored yet, or `AppError::Db` if the write fails.
    pub async fn store_exchange(&self, user_id: &str, response: TokenResponse) -> Result<GoogleToken> {
        let now = Utc::now();
        let refresh_token = match response.refresh_token {
            Some(token) => token,
            None => self
                .repo
                .get(user_id)
                .await?
                .map(|existing| existing.refresh_token)
                .ok_or_else(|| AppError::Upstream("token response lacks refresh_token".into()))?,
        };
        let token = GoogleToken {
            user_id: user_id.to_owned(),
            access_token: response.access_token,
            refresh_token,
            expires_at: expiry_from(now, response.expires_in),
            scope: response.scope,
            updated_at: now,
        };
        self.repo.upsert(&token).await?;
        info!(user_id, "google account connected");
        Ok(token)
    }

    /// A non-expired access token for `user_id`.
    ///
    /// Refreshes when the stored token expires within a minute, storing the
    /// new token before returning it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the user never connected or the
    /// refresh token was revoked.
    pub async fn access_token(&self, user_id: &str) -> Result<String> {
        let token = self
            .repo
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("google account not connected".into()))?;

        let now = Utc::now();
        if !token.expires_within(now, Duration::seconds(EXPIRY_SKEW_SECONDS)) {
            return Ok(token.access_token);
        }

        info!(user_id, expires_at = %token.expires_at, "refreshing google access token");
        let refreshed = self.oauth.refresh(&token.refresh_token).await?;
        let expires_at = expiry_from(now, refreshed.expires_in);
        self.repo
            .update_access_token(
                user_id,
                &refreshed.access_token,
                expires_at,
                refreshed.refresh_token.as_deref(),
            )
            .await?;
        Ok(refreshed.access_token)
    }

    /// Stored token for `user_id`, if connected.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the lookup fails.
    pub async fn status(&self, user_id: &str) -> Result<Option<GoogleToken>> {
        self.repo.get(user_id).await
    }

    /// Forget the stored tokens for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the user was not connected.
    pub async fn disconnect(&self, user_id: &str) -> Result<()> {
        if self.repo.delete(user_id).await? {
            info!(user_id, "google account disconnected");
            Ok(())
        } else {
            Err(AppError::NotFound("google account not connected".into()))
        }
    }
}

fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    now + Duration::seconds(expires_in.max(0))
}
