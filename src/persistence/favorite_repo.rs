//! Sentence favorite repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::sentence::{ExampleSentence, FavoriteWithSentence, SentenceFavorite};
use crate::{AppError, Result};

use super::db::Database;

/// Repository for `sentence_favorites`.
#[derive(Clone)]
pub struct FavoriteRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: String,
    user_id: String,
    sentence_id: String,
    created_at: String,
}

impl FavoriteRow {
    fn into_favorite(self) -> Result<SentenceFavorite> {
        Ok(SentenceFavorite {
            created_at: super::parse_timestamp(&self.created_at)?,
            id: self.id,
            user_id: self.user_id,
            sentence_id: self.sentence_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct JoinedRow {
    fav_id: String,
    user_id: String,
    sentence_id: String,
    created_at: String,
    japanese: String,
    reading: Option<String>,
    english: String,
    dictionary_form: Option<String>,
    jlpt_level: Option<String>,
}

impl JoinedRow {
    fn into_joined(self) -> Result<FavoriteWithSentence> {
        let sentence = ExampleSentence {
            id: self.sentence_id.clone(),
            japanese: self.japanese,
            reading: self.reading,
            english: self.english,
            dictionary_form: self.dictionary_form,
            jlpt_level: self
                .jlpt_level
                .as_deref()
                .map(super::parse_level)
                .transpose()?,
        };
        let favorite = SentenceFavorite {
            id: self.fav_id,
            user_id: self.user_id,
            sentence_id: self.sentence_id,
            created_at: super::parse_timestamp(&self.created_at)?,
        };
        Ok(FavoriteWithSentence { favorite, sentence })
    }
}

impl FavoriteRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Star a sentence for a user. Returns the existing record when already starred.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the sentence does not exist, or
    /// `AppError::Db` if the write fails.
    pub async fn add(&self, user_id: &str, sentence_id: &str) -> Result<SentenceFavorite> {
        let exists: Option<String> =
            sqlx::query_scalar("SELECT id FROM example_sentences WHERE id = ?1")
                .bind(sentence_id)
                .fetch_optional(self.db.as_ref())
                .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("sentence not found: {sentence_id}")));
        }

        let candidate = SentenceFavorite::new(user_id.to_owned(), sentence_id.to_owned());
        sqlx::query(
            "INSERT INTO sentence_favorites (id, user_id, sentence_id, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, sentence_id) DO NOTHING",
        )
        .bind(&candidate.id)
        .bind(&candidate.user_id)
        .bind(&candidate.sentence_id)
        .bind(candidate.created_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;

        let row: FavoriteRow = sqlx::query_as(
            "SELECT id, user_id, sentence_id, created_at FROM sentence_favorites
             WHERE user_id = ?1 AND sentence_id = ?2",
        )
        .bind(user_id)
        .bind(sentence_id)
        .fetch_one(self.db.as_ref())
        .await?;
        row.into_favorite()
    }

    /// Remove a favorite.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the user had not starred the sentence.
    pub async fn remove(&self, user_id: &str, sentence_id: &str) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM sentence_favorites WHERE user_id = ?1 AND sentence_id = ?2")
                .bind(user_id)
                .bind(sentence_id)
                .execute(self.db.as_ref())
                .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("favorite not found".into()));
        }
        Ok(())
    }

    /// List a user's favorites with their sentences, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<FavoriteWithSentence>> {
        let rows: Vec<JoinedRow> = sqlx::query_as(
            "SELECT f.id AS fav_id, f.user_id, f.sentence_id, f.created_at,
                    s.japanese, s.reading, s.english, s.dictionary_form, s.jlpt_level
             FROM sentence_favorites f
             JOIN example_sentences s ON s.id = f.sentence_id
             WHERE f.user_id = ?1
             ORDER BY f.created_at DESC, f.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.db.as_ref())
        .await?;
        rows.into_iter().map(JoinedRow::into_joined).collect()
    }
}
