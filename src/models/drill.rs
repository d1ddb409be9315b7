//! Drill sentences, prompts, and the questions built from them.

use serde::{Deserialize, Serialize};

use super::verb::Conjugation;
use super::{JlptLevel, WordType};

/// Fill-in-the-blank sentence anchored on one dictionary form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrillSentence {
    /// Record identifier.
    pub id: String,
    /// Dictionary form the blank is conjugated from.
    pub dictionary_form: String,
    /// Word type of `dictionary_form`.
    pub word_type: WordType,
    /// Difficulty level.
    pub jlpt_level: JlptLevel,
    /// Japanese text containing the blank.
    pub japanese: String,
    /// English translation.
    pub english: String,
}

/// Instruction asking for one conjugation form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrillPrompt {
    /// Record identifier.
    pub id: String,
    /// Conjugation key the learner must produce.
    pub target_form: String,
    /// Instruction shown to the learner.
    pub prompt_text: String,
    /// Word types this prompt applies to.
    pub word_types: Vec<WordType>,
}

impl DrillPrompt {
    /// Whether the prompt may be paired with a word of `word_type`.
    #[must_use]
    pub fn applies_to(&self, word_type: WordType) -> bool {
        self.word_types.contains(&word_type)
    }
}

/// Multiple-choice question produced by the sentence drill generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrillQuestion {
    /// Question identifier, unique per response.
    pub id: String,
    /// Source sentence.
    pub sentence_id: String,
    /// Source prompt.
    pub prompt_id: String,
    /// Dictionary form being conjugated.
    pub dictionary_form: String,
    /// Japanese sentence with the blank.
    pub japanese: String,
    /// English translation.
    pub english: String,
    /// Instruction text.
    pub prompt: String,
    /// Conjugation key asked for.
    pub target_form: String,
    /// Expected answer (kanji form).
    pub correct_answer: String,
    /// Expected answer in kana.
    pub reading: String,
    /// Expected answer in romaji.
    pub romaji: String,
    /// Shuffled options, exactly one of which is `correct_answer`.
    pub options: Vec<String>,
}

/// Item of a random conjugation drill (no sentence context).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RandomDrillItem {
    /// Dictionary form being conjugated.
    pub dictionary_form: String,
    /// Kana reading of the dictionary form.
    pub reading: String,
    /// English gloss.
    pub meaning: String,
    /// Word type.
    pub word_type: WordType,
    /// Conjugation key asked for.
    pub target_form: String,
    /// Human-readable label for `target_form`.
    pub target_label: String,
    /// Expected answer.
    pub answer: Conjugation,
    /// Shuffled options, exactly one of which is `answer.kanji`.
    pub options: Vec<String>,
}
