//! Drill sentence and prompt repository for `SQLite` persistence.

use std::sync::Arc;

use sqlx::{QueryBuilder, Sqlite};

use crate::models::drill::{DrillPrompt, DrillSentence};
use crate::models::{JlptLevel, WordType};
use crate::Result;

use super::db::Database;

/// Repository for `drill_sentences` and `drill_prompts`.
#[derive(Clone)]
pub struct DrillRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct SentenceRow {
    id: String,
    dictionary_form: String,
    word_type: String,
    jlpt_level: String,
    japanese: String,
    english: String,
}

impl SentenceRow {
    fn into_sentence(self) -> Result<DrillSentence> {
        Ok(DrillSentence {
            word_type: super::parse_word_type(&self.word_type)?,
            jlpt_level: super::parse_level(&self.jlpt_level)?,
            id: self.id,
            dictionary_form: self.dictionary_form,
            japanese: self.japanese,
            english: self.english,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PromptRow {
    id: String,
    target_form: String,
    prompt_text: String,
    word_types: String,
}

impl PromptRow {
    fn into_prompt(self) -> Result<DrillPrompt> {
        let word_types: Vec<WordType> = serde_json::from_str(&self.word_types)?;
        Ok(DrillPrompt {
            id: self.id,
            target_form: self.target_form,
            prompt_text: self.prompt_text,
            word_types,
        })
    }
}

impl DrillRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace a drill sentence.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert_sentence(&self, sentence: &DrillSentence) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO drill_sentences (id, dictionary_form, word_type, jlpt_level, japanese, english)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&sentence.id)
        .bind(&sentence.dictionary_form)
        .bind(sentence.word_type.as_str())
        .bind(sentence.jlpt_level.as_str())
        .bind(&sentence.japanese)
        .bind(&sentence.english)
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Insert or replace a drill prompt.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert_prompt(&self, prompt: &DrillPrompt) -> Result<()> {
        let word_types = serde_json::to_string(&prompt.word_types)?;
        sqlx::query(
            "INSERT OR REPLACE INTO drill_prompts (id, target_form, prompt_text, word_types)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&prompt.id)
        .bind(&prompt.target_form)
        .bind(&prompt.prompt_text)
        .bind(&word_types)
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Sentences at `level` whose word type is in `word_types`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_sentences(
        &self,
        level: JlptLevel,
        word_types: &[WordType],
    ) -> Result<Vec<DrillSentence>> {
        if word_types.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT id, dictionary_form, word_type, jlpt_level, japanese, english
             FROM drill_sentences WHERE jlpt_level = ",
        );
        builder.push_bind(level.as_str());
        builder.push(" AND word_type IN (");
        let mut separated = builder.separated(", ");
        for word_type in word_types {
            separated.push_bind(word_type.as_str());
        }
        separated.push_unseparated(") ORDER BY id ASC");

        let rows: Vec<SentenceRow> = builder
            .build_query_as()
            .fetch_all(self.db.as_ref())
            .await?;
        rows.into_iter().map(SentenceRow::into_sentence).collect()
    }

    /// Prompts applicable to at least one of `word_types`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_prompts(&self, word_types: &[WordType]) -> Result<Vec<DrillPrompt>> {
        let rows: Vec<PromptRow> = sqlx::query_as(
            "SELECT id, target_form, prompt_text, word_types FROM drill_prompts ORDER BY id ASC",
        )
        .fetch_all(self.db.as_ref())
        .await?;

        let mut prompts = Vec::with_capacity(rows.len());
        for row in rows {
            let prompt = row.into_prompt()?;
            if word_types.iter().any(|wt| prompt.applies_to(*wt)) {
                prompts.push(prompt);
            }
        }
        Ok(prompts)
    }
}
