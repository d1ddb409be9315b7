//! Matching of learner input against an expected conjugation.

use serde::{Deserialize, Serialize};

use crate::models::verb::{Conjugation, Verb};

use super::normalize::{normalize, normalize_romaji};

/// Outcome of checking one answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the input matched the kanji, reading, or romaji form.
    pub is_valid: bool,
    /// The input exactly as submitted.
    pub input: String,
    /// Correction string: the expected kanji form.
    pub correct_answer: String,
    /// Expected kana reading.
    pub reading: String,
    /// Expected romaji.
    pub romaji: String,
    /// Form key, set in batch results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_key: Option<String>,
    /// Why the item could not be checked, set in batch results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One entry of a batch validation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    /// Conjugation key being answered.
    pub form_key: String,
    /// Learner input.
    pub input: String,
}

/// Whether `input` matches `expected`.
///
/// Kanji and reading compare after NFKC normalization and whitespace
/// removal; romaji additionally compares case-insensitively.
#[must_use]
pub fn matches(expected: &Conjugation, input: &str) -> bool {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return false;
    }
    normalized == normalize(&expected.kanji)
        || normalized == normalize(&expected.reading)
        || normalize_romaji(input) == normalize_romaji(&expected.romaji)
}

/// Check `input` against `expected`.
#[must_use]
pub fn validate(expected: &Conjugation, input: &str) -> ValidationResult {
    ValidationResult {
        is_valid: matches(expected, input),
        input: input.to_owned(),
        correct_answer: expected.kanji.clone(),
        reading: expected.reading.clone(),
        romaji: expected.romaji.clone(),
        form_key: None,
        error: None,
    }
}

/// Check several answers against one verb's conjugation table.
///
/// Unknown form keys produce an invalid result carrying an error message
/// instead of failing the whole batch.
#[must_use]
pub fn validate_batch(verb: &Verb, items: &[BatchItem]) -> Vec<ValidationResult> {
    items
        .iter()
        .map(|item| match verb.conjugation(&item.form_key) {
            Some(expected) => ValidationResult {
                form_key: Some(item.form_key.clone()),
                ..validate(expected, &item.input)
            },
            None => ValidationResult {
                is_valid: false,
                input: item.input.clone(),
                correct_answer: String::new(),
                reading: String::new(),
                romaji: String::new(),
                form_key: Some(item.form_key.clone()),
                error: Some(format!("unknown form: {}", item.form_key)),
            },
        })
        .collect()
}
