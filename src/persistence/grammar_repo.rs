//! Grammar topic repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::grammar::GrammarTopic;
use crate::models::JlptLevel;
use crate::{AppError, Result};

use super::db::Database;

/// Repository for `grammar_topics`.
#[derive(Clone)]
pub struct GrammarRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct TopicRow {
    id: String,
    title: String,
    jlpt_level: String,
    structure: String,
    explanation: String,
    examples: String,
}

impl TopicRow {
    fn into_topic(self) -> Result<GrammarTopic> {
        Ok(GrammarTopic {
            jlpt_level: super::parse_level(&self.jlpt_level)?,
            examples: serde_json::from_str(&self.examples)?,
            id: self.id,
            title: self.title,
            structure: self.structure,
            explanation: self.explanation,
        })
    }
}

impl GrammarRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace a topic.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert(&self, topic: &GrammarTopic) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO grammar_topics (id, title, jlpt_level, structure, explanation, examples)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&topic.id)
        .bind(&topic.title)
        .bind(topic.jlpt_level.as_str())
        .bind(&topic.structure)
        .bind(&topic.explanation)
        .bind(serde_json::to_string(&topic.examples)?)
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Retrieve a topic by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the topic does not exist.
    pub async fn get_by_id(&self, id: &str) -> Result<GrammarTopic> {
        let row: Option<TopicRow> = sqlx::query_as(
            "SELECT id, title, jlpt_level, structure, explanation, examples
             FROM grammar_topics WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.db.as_ref())
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("grammar topic not found: {id}")))?
            .into_topic()
    }

    /// List topics, easiest level first, then by title.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list(&self, level: Option<JlptLevel>) -> Result<Vec<GrammarTopic>> {
        let rows: Vec<TopicRow> = sqlx::query_as(
            "SELECT id, title, jlpt_level, structure, explanation, examples
             FROM grammar_topics
             WHERE ?1 IS NULL OR jlpt_level = ?1
             ORDER BY jlpt_level DESC, title ASC",
        )
        .bind(level.map(JlptLevel::as_str))
        .fetch_all(self.db.as_ref())
        .await?;
        rows.into_iter().map(TopicRow::into_topic).collect()
    }
}
