//! Bulk import of reference data from a JSON seed file.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::drill::{DrillPrompt, DrillSentence};
use crate::models::grammar::GrammarTopic;
use crate::models::kanji::Kanji;
use crate::models::sentence::ExampleSentence;
use crate::models::verb::Verb;
use crate::{AppError, Result};

use super::db::Database;
use super::drill_repo::DrillRepo;
use super::grammar_repo::GrammarRepo;
use super::kanji_repo::KanjiRepo;
use super::sentence_repo::SentenceRepo;
use super::verb_repo::VerbRepo;

/// Reference data accepted by [`apply`]. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    /// Verbs and adjectives with conjugation tables.
    pub verbs: Vec<Verb>,
    /// Fill-in-the-blank drill sentences.
    pub drill_sentences: Vec<DrillSentence>,
    /// Drill prompts.
    pub drill_prompts: Vec<DrillPrompt>,
    /// Example sentences.
    pub example_sentences: Vec<ExampleSentence>,
    /// Grammar topics.
    pub grammar_topics: Vec<GrammarTopic>,
    /// Pre-cached kanji.
    pub kanji: Vec<Kanji>,
}

/// Row counts written by [`apply`].
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    /// Verbs written.
    pub verbs: usize,
    /// Drill sentences written.
    pub drill_sentences: usize,
    /// Drill prompts written.
    pub drill_prompts: usize,
    /// Example sentences written.
    pub example_sentences: usize,
    /// Grammar topics written.
    pub grammar_topics: usize,
    /// Kanji written.
    pub kanji: usize,
}

impl SeedData {
    /// Read seed data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read or
    /// `AppError::BadRequest` if it is not valid seed JSON.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse seed data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the JSON does not match the seed format.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| AppError::BadRequest(format!("invalid seed: {err}")))
    }
}

/// Upsert every record of `seed` into the database.
///
/// Re-applying the same seed is idempotent.
///
/// # Errors
///
/// Returns `AppError::Db` on the first failed write.
pub async fn apply(db: &Arc<Database>, seed: &SeedData) -> Result<SeedReport> {
    let verbs = VerbRepo::new(Arc::clone(db));
    for verb in &seed.verbs {
        verbs.upsert(verb).await?;
    }

    let drills = DrillRepo::new(Arc::clone(db));
    for sentence in &seed.drill_sentences {
        drills.upsert_sentence(sentence).await?;
    }
    for prompt in &seed.drill_prompts {
        drills.upsert_prompt(prompt).await?;
    }

    let sentences = SentenceRepo::new(Arc::clone(db));
    for sentence in &seed.example_sentences {
        sentences.upsert(sentence).await?;
    }

    let grammar = GrammarRepo::new(Arc::clone(db));
    for topic in &seed.grammar_topics {
        grammar.upsert(topic).await?;
    }

    let kanji = KanjiRepo::new(Arc::clone(db));
    for entry in &seed.kanji {
        kanji.upsert(entry).await?;
    }

    let report = SeedReport {
        verbs: seed.verbs.len(),
        drill_sentences: seed.drill_sentences.len(),
        drill_prompts: seed.drill_prompts.len(),
        example_sentences: seed.example_sentences.len(),
        grammar_topics: seed.grammar_topics.len(),
        kanji: seed.kanji.len(),
    };
    info!(?report, "seed applied");
    Ok(report)
}
