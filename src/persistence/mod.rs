//! Persistence layer modules.

use chrono::{DateTime, Utc};

use crate::models::{JlptLevel, WordType};
use crate::{AppError, Result};

pub mod db;
pub mod drill_repo;
pub mod favorite_repo;
pub mod grammar_repo;
pub mod kanji_repo;
pub mod oauth_state_repo;
pub mod retention;
pub mod schema;
pub mod seed;
pub mod sentence_repo;
pub mod token_repo;
pub mod verb_repo;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Db(format!("invalid timestamp {raw}: {e}")))
}

fn parse_level(raw: &str) -> Result<JlptLevel> {
    raw.parse::<JlptLevel>()
        .map_err(|_| AppError::Db(format!("invalid jlpt_level: {raw}")))
}

fn parse_word_type(raw: &str) -> Result<WordType> {
    raw.parse::<WordType>()
        .map_err(|_| AppError::Db(format!("invalid word_type: {raw}")))
}
