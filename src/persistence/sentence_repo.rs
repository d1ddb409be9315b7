//! Example sentence repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::sentence::ExampleSentence;
use crate::models::JlptLevel;
use crate::{AppError, Result};

use super::db::Database;

/// Repository for `example_sentences`.
#[derive(Clone)]
pub struct SentenceRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct SentenceRow {
    id: String,
    japanese: String,
    reading: Option<String>,
    english: String,
    dictionary_form: Option<String>,
    jlpt_level: Option<String>,
}

impl SentenceRow {
    fn into_sentence(self) -> Result<ExampleSentence> {
        Ok(ExampleSentence {
            jlpt_level: self
                .jlpt_level
                .as_deref()
                .map(super::parse_level)
                .transpose()?,
            id: self.id,
            japanese: self.japanese,
            reading: self.reading,
            english: self.english,
            dictionary_form: self.dictionary_form,
        })
    }
}

impl SentenceRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace an example sentence.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert(&self, sentence: &ExampleSentence) -> Result<()> {
        sqlx::query(
            "INSERT INTO example_sentences (id, japanese, reading, english, dictionary_form, jlpt_level)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                japanese = excluded.japanese,
                reading = excluded.reading,
                english = excluded.english,
                dictionary_form = excluded.dictionary_form,
                jlpt_level = excluded.jlpt_level",
        )
        .bind(&sentence.id)
        .bind(&sentence.japanese)
        .bind(&sentence.reading)
        .bind(&sentence.english)
        .bind(&sentence.dictionary_form)
        .bind(sentence.jlpt_level.map(JlptLevel::as_str))
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Retrieve a sentence by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the sentence does not exist.
    pub async fn get_by_id(&self, id: &str) -> Result<ExampleSentence> {
        let row: Option<SentenceRow> = sqlx::query_as(
            "SELECT id, japanese, reading, english, dictionary_form, jlpt_level
             FROM example_sentences WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.db.as_ref())
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("sentence not found: {id}")))?
            .into_sentence()
    }

    /// Search sentences by word and level.
    ///
    /// `word` matches the dictionary form exactly or appears in the Japanese
    /// text. Both filters are optional.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn search(
        &self,
        word: Option<&str>,
        level: Option<JlptLevel>,
        limit: u32,
    ) -> Result<Vec<ExampleSentence>> {
        let pattern = word.map(|w| format!("%{w}%"));
        let rows: Vec<SentenceRow> = sqlx::query_as(
            "SELECT id, japanese, reading, english, dictionary_form, jlpt_level
             FROM example_sentences
             WHERE (?1 IS NULL OR dictionary_form = ?1 OR japanese LIKE ?2)
               AND (?3 IS NULL OR jlpt_level = ?3)
             ORDER BY id ASC
             LIMIT ?4",
        )
        .bind(word)
        .bind(pattern.as_deref())
        .bind(level.map(JlptLevel::as_str))
        .bind(i64::from(limit))
        .fetch_all(self.db.as_ref())
        .await?;
        rows.into_iter().map(SentenceRow::into_sentence).collect()
    }
}
