//! Verb repository for `SQLite` persistence.

use std::collections::BTreeMap;
use std::sync::Arc;

use sqlx::{QueryBuilder, Sqlite};

use crate::models::verb::{Conjugation, Verb};
use crate::models::{JlptLevel, WordType};
use crate::{AppError, Result};

use super::db::Database;

const VERB_COLUMNS: &str =
    "SELECT dictionary_form, reading, romaji, meaning, word_type, jlpt_level, conjugations FROM verbs";

/// Repository for verb and adjective records.
#[derive(Clone)]
pub struct VerbRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct VerbRow {
    dictionary_form: String,
    reading: String,
    romaji: String,
    meaning: String,
    word_type: String,
    jlpt_level: String,
    conjugations: String,
}

impl VerbRow {
    fn into_verb(self) -> Result<Verb> {
        let conjugations: BTreeMap<String, Conjugation> =
            serde_json::from_str(&self.conjugations)?;
        Ok(Verb {
            word_type: super::parse_word_type(&self.word_type)?,
            jlpt_level: super::parse_level(&self.jlpt_level)?,
            dictionary_form: self.dictionary_form,
            reading: self.reading,
            romaji: self.romaji,
            meaning: self.meaning,
            conjugations,
        })
    }
}

impl VerbRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace a verb keyed by dictionary form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert(&self, verb: &Verb) -> Result<()> {
        let conjugations = serde_json::to_string(&verb.conjugations)?;
        sqlx::query(
            "INSERT INTO verbs (dictionary_form, reading, romaji, meaning, word_type, jlpt_level, conjugations)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(dictionary_form) DO UPDATE SET
                reading = excluded.reading,
                romaji = excluded.romaji,
                meaning = excluded.meaning,
                word_type = excluded.word_type,
                jlpt_level = excluded.jlpt_level,
                conjugations = excluded.conjugations",
        )
        .bind(&verb.dictionary_form)
        .bind(&verb.reading)
        .bind(&verb.romaji)
        .bind(&verb.meaning)
        .bind(verb.word_type.as_str())
        .bind(verb.jlpt_level.as_str())
        .bind(&conjugations)
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Retrieve a verb by dictionary form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no verb has this dictionary form.
    pub async fn get_by_dictionary_form(&self, dictionary_form: &str) -> Result<Verb> {
        let row: Option<VerbRow> = sqlx::query_as(&format!("{VERB_COLUMNS} WHERE dictionary_form = ?1"))
            .bind(dictionary_form)
            .fetch_optional(self.db.as_ref())
            .await?;
        row.ok_or_else(|| AppError::NotFound(format!("verb not found: {dictionary_form}")))?
            .into_verb()
    }

    /// Fetch every verb whose dictionary form is in `forms`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_by_dictionary_forms(&self, forms: &[String]) -> Result<Vec<Verb>> {
        if forms.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("{VERB_COLUMNS} WHERE dictionary_form IN ("));
        let mut separated = builder.separated(", ");
        for form in forms {
            separated.push_bind(form.as_str());
        }
        separated.push_unseparated(")");

        let rows: Vec<VerbRow> = builder
            .build_query_as()
            .fetch_all(self.db.as_ref())
            .await?;
        rows.into_iter().map(VerbRow::into_verb).collect()
    }

    /// List verbs, optionally filtered by level and word types, ordered by key.
    ///
    /// An empty `word_types` slice applies no word-type filter.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list(
        &self,
        level: Option<JlptLevel>,
        word_types: &[WordType],
    ) -> Result<Vec<Verb>> {
        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("{VERB_COLUMNS} WHERE 1 = 1"));
        if let Some(level) = level {
            builder.push(" AND jlpt_level = ").push_bind(level.as_str());
        }
        if !word_types.is_empty() {
            builder.push(" AND word_type IN (");
            let mut separated = builder.separated(", ");
            for word_type in word_types {
                separated.push_bind(word_type.as_str());
            }
            separated.push_unseparated(")");
        }
        builder.push(" ORDER BY dictionary_form ASC");

        let rows: Vec<VerbRow> = builder
            .build_query_as()
            .fetch_all(self.db.as_ref())
            .await?;
        rows.into_iter().map(VerbRow::into_verb).collect()
    }

    /// Count verbs, optionally at one level.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn count(&self, level: Option<JlptLevel>) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM verbs WHERE ?1 IS NULL OR jlpt_level = ?1",
        )
        .bind(level.map(JlptLevel::as_str))
        .fetch_one(self.db.as_ref())
        .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Fetch the verb at `offset` in dictionary-form order, optionally at one level.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn nth(&self, level: Option<JlptLevel>, offset: u64) -> Result<Option<Verb>> {
        let row: Option<VerbRow> = sqlx::query_as(&format!(
            "{VERB_COLUMNS} WHERE ?1 IS NULL OR jlpt_level = ?1 \
             ORDER BY dictionary_form ASC LIMIT 1 OFFSET ?2"
        ))
        .bind(level.map(JlptLevel::as_str))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_optional(self.db.as_ref())
        .await?;
        row.map(VerbRow::into_verb).transpose()
    }
}
