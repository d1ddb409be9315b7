//! Example sentences and per-user favorites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::JlptLevel;

/// Example sentence shown alongside vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSentence {
    /// Record identifier.
    pub id: String,
    /// Japanese text.
    pub japanese: String,
    /// Optional kana reading of the whole sentence.
    #[serde(default)]
    pub reading: Option<String>,
    /// English translation.
    pub english: String,
    /// Dictionary form the sentence illustrates.
    #[serde(default)]
    pub dictionary_form: Option<String>,
    /// Difficulty level.
    #[serde(default)]
    pub jlpt_level: Option<JlptLevel>,
}

/// A sentence a user starred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentenceFavorite {
    /// Record identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Starred sentence.
    pub sentence_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SentenceFavorite {
    /// Construct a favorite with a generated identifier.
    #[must_use]
    pub fn new(user_id: String, sentence_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            sentence_id,
            created_at: Utc::now(),
        }
    }
}

/// Favorite joined with the sentence it points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWithSentence {
    /// The favorite record.
    pub favorite: SentenceFavorite,
    /// The starred sentence.
    pub sentence: ExampleSentence,
}
