//! Grammar topic reference entries.

use serde::{Deserialize, Serialize};

use super::JlptLevel;

/// A grammar point with explanation and examples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GrammarTopic {
    /// Record identifier.
    pub id: String,
    /// Short title, e.g. `〜てもいい`.
    pub title: String,
    /// Difficulty level.
    pub jlpt_level: JlptLevel,
    /// Structure pattern, e.g. `V-te + もいい`.
    pub structure: String,
    /// Explanation text.
    pub explanation: String,
    /// Example sentences.
    #[serde(default)]
    pub examples: Vec<String>,
}
