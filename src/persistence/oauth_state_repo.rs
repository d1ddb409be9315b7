//! Pending OAuth authorization states.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::google::OAuthState;
use crate::Result;

use super::db::Database;

/// Repository for `oauth_states`.
#[derive(Clone)]
pub struct OAuthStateRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct StateRow {
    state: String,
    user_id: String,
    created_at: String,
}

impl OAuthStateRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Persist a new pending state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, state: &OAuthState) -> Result<()> {
        sqlx::query("INSERT INTO oauth_states (state, user_id, created_at) VALUES (?1, ?2, ?3)")
            .bind(&state.state)
            .bind(&state.user_id)
            .bind(state.created_at.to_rfc3339())
            .execute(self.db.as_ref())
            .await?;
        Ok(())
    }

    /// Remove and return the pending state, if present.
    ///
    /// A state can only be consumed once.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn take(&self, state: &str) -> Result<Option<OAuthState>> {
        let row: Option<StateRow> = sqlx::query_as(
            "DELETE FROM oauth_states WHERE state = ?1 RETURNING state, user_id, created_at",
        )
        .bind(state)
        .fetch_optional(self.db.as_ref())
        .await?;

        row.map(|row| {
            Ok(OAuthState {
                created_at: super::parse_timestamp(&row.created_at)?,
                state: row.state,
                user_id: row.user_id,
            })
        })
        .transpose()
    }

    /// Delete states created before `before`. Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn purge(&self, before: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM oauth_states WHERE created_at < ?1")
            .bind(before.to_rfc3339())
            .execute(self.db.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
