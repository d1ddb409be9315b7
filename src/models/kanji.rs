//! Cached kanji records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::JlptLevel;

/// Normalized kanji entry, cached from the kanji data API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Kanji {
    /// The character itself; unique key.
    pub character: String,
    /// English meaning.
    pub meaning: String,
    /// On'yomi readings (katakana).
    #[serde(default)]
    pub onyomi: Vec<String>,
    /// Kun'yomi readings (hiragana).
    #[serde(default)]
    pub kunyomi: Vec<String>,
    /// Stroke count.
    #[serde(default)]
    pub stroke_count: Option<u32>,
    /// School grade.
    #[serde(default)]
    pub grade: Option<u32>,
    /// Difficulty level.
    #[serde(default)]
    pub jlpt_level: Option<JlptLevel>,
    /// When the record was fetched or seeded.
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}
