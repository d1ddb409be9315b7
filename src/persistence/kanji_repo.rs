//! Kanji cache repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::kanji::Kanji;
use crate::models::JlptLevel;
use crate::Result;

use super::db::Database;

const KANJI_COLUMNS: &str = "SELECT character, meaning, onyomi, kunyomi, stroke_count, grade, jlpt_level, fetched_at FROM kanji";

/// Repository for cached `kanji` records.
#[derive(Clone)]
pub struct KanjiRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct KanjiRow {
    character: String,
    meaning: String,
    onyomi: String,
    kunyomi: String,
    stroke_count: Option<i64>,
    grade: Option<i64>,
    jlpt_level: Option<String>,
    fetched_at: String,
}

impl KanjiRow {
    fn into_kanji(self) -> Result<Kanji> {
        Ok(Kanji {
            onyomi: serde_json::from_str(&self.onyomi)?,
            kunyomi: serde_json::from_str(&self.kunyomi)?,
            stroke_count: self.stroke_count.and_then(|n| u32::try_from(n).ok()),
            grade: self.grade.and_then(|n| u32::try_from(n).ok()),
            jlpt_level: self
                .jlpt_level
                .as_deref()
                .map(super::parse_level)
                .transpose()?,
            fetched_at: super::parse_timestamp(&self.fetched_at)?,
            character: self.character,
            meaning: self.meaning,
        })
    }
}

impl KanjiRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace a kanji record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert(&self, kanji: &Kanji) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO kanji
                (character, meaning, onyomi, kunyomi, stroke_count, grade, jlpt_level, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&kanji.character)
        .bind(&kanji.meaning)
        .bind(serde_json::to_string(&kanji.onyomi)?)
        .bind(serde_json::to_string(&kanji.kunyomi)?)
        .bind(kanji.stroke_count.map(i64::from))
        .bind(kanji.grade.map(i64::from))
        .bind(kanji.jlpt_level.map(JlptLevel::as_str))
        .bind(kanji.fetched_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Cached record for `character`, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get(&self, character: &str) -> Result<Option<Kanji>> {
        let row: Option<KanjiRow> = sqlx::query_as(&format!("{KANJI_COLUMNS} WHERE character = ?1"))
            .bind(character)
            .fetch_optional(self.db.as_ref())
            .await?;
        row.map(KanjiRow::into_kanji).transpose()
    }

    /// Count cached kanji, optionally at one level.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn count(&self, level: Option<JlptLevel>) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM kanji WHERE ?1 IS NULL OR jlpt_level = ?1",
        )
        .bind(level.map(JlptLevel::as_str))
        .fetch_one(self.db.as_ref())
        .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Fetch the kanji at `offset` in character order, optionally at one level.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn nth(&self, level: Option<JlptLevel>, offset: u64) -> Result<Option<Kanji>> {
        let row: Option<KanjiRow> = sqlx::query_as(&format!(
            "{KANJI_COLUMNS} WHERE ?1 IS NULL OR jlpt_level = ?1 \
             ORDER BY character ASC LIMIT 1 OFFSET ?2"
        ))
        .bind(level.map(JlptLevel::as_str))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_optional(self.db.as_ref())
        .await?;
        row.map(KanjiRow::into_kanji).transpose()
    }
}
