//! Google OAuth token repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::google::GoogleToken;
use crate::Result;

use super::db::Database;

/// Repository for `user_google_tokens`.
#[derive(Clone)]
pub struct TokenRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    user_id: String,
    access_token: String,
    refresh_token: String,
    expires_at: String,
    scope: Option<String>,
    updated_at: String,
}

impl TokenRow {
    fn into_token(self) -> Result<GoogleToken> {
        Ok(GoogleToken {
            expires_at: super::parse_timestamp(&self.expires_at)?,
            updated_at: super::parse_timestamp(&self.updated_at)?,
            user_id: self.user_id,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            scope: self.scope,
        })
    }
}

impl TokenRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace the tokens for a user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert(&self, token: &GoogleToken) -> Result<()> {
        sqlx::query(
            "INSERT INTO user_google_tokens (user_id, access_token, refresh_token, expires_at, scope, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                expires_at = excluded.expires_at,
                scope = excluded.scope,
                updated_at = excluded.updated_at",
        )
        .bind(&token.user_id)
        .bind(&token.access_token)
        .bind(&token.refresh_token)
        .bind(token.expires_at.to_rfc3339())
        .bind(&token.scope)
        .bind(token.updated_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Tokens stored for `user_id`, if connected.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get(&self, user_id: &str) -> Result<Option<GoogleToken>> {
        let row: Option<TokenRow> = sqlx::query_as(
            "SELECT user_id, access_token, refresh_token, expires_at, scope, updated_at
             FROM user_google_tokens WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(self.db.as_ref())
        .await?;
        row.map(TokenRow::into_token).transpose()
    }

    /// Store a refreshed access token and its expiry.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the update fails.
    pub async fn update_access_token(
        &self,
        user_id: &str,
        access_token: &str,
        expires_at: DateTime<Utc>,
        refresh_token: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE user_google_tokens
             SET access_token = ?2,
                 expires_at = ?3,
                 refresh_token = COALESCE(?4, refresh_token),
                 updated_at = ?5
             WHERE user_id = ?1",
        )
        .bind(user_id)
        .bind(access_token)
        .bind(expires_at.to_rfc3339())
        .bind(refresh_token)
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Forget the tokens for a user. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn delete(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_google_tokens WHERE user_id = ?1")
            .bind(user_id)
            .execute(self.db.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
