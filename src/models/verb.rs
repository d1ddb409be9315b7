//! Verb and adjective entries with their conjugation tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{JlptLevel, WordType};

/// One inflected form, written three ways.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conjugation {
    /// Form written with kanji, e.g. `食べて`.
    pub kanji: String,
    /// Kana reading, e.g. `たべて`.
    pub reading: String,
    /// Hepburn romanization, e.g. `tabete`.
    pub romaji: String,
}

/// A drillable verb or adjective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Verb {
    /// Dictionary (citation) form; unique key.
    pub dictionary_form: String,
    /// Kana reading of the dictionary form.
    pub reading: String,
    /// Romanized dictionary form.
    pub romaji: String,
    /// English gloss.
    pub meaning: String,
    /// Grammatical class.
    pub word_type: WordType,
    /// Difficulty level.
    pub jlpt_level: JlptLevel,
    /// Form key (`te_form`, `past`, `negative`, ...) to inflected form.
    #[serde(default)]
    pub conjugations: BTreeMap<String, Conjugation>,
}

impl Verb {
    /// Look up a single conjugation by form key.
    #[must_use]
    pub fn conjugation(&self, form_key: &str) -> Option<&Conjugation> {
        self.conjugations.get(form_key)
    }
}

/// Human-readable label for a conjugation form key.
#[must_use]
pub fn form_label(form_key: &str) -> &str {
    match form_key {
        "masu" => "polite (masu) form",
        "te_form" => "te-form",
        "past" => "plain past",
        "negative" => "plain negative",
        "past_negative" => "plain past negative",
        "masu_past" => "polite past",
        "masu_negative" => "polite negative",
        "potential" => "potential form",
        "volitional" => "volitional form",
        "passive" => "passive form",
        "causative" => "causative form",
        "imperative" => "imperative form",
        "conditional_ba" => "ba-conditional",
        "conditional_tara" => "tara-conditional",
        other => other,
    }
}
