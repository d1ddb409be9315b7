//! Sentence drill generator.
//!
//! Pairs random drill sentences with random compatible prompts and turns
//! each pair into a multiple-choice question about the sentence's verb.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::drill::{DrillPrompt, DrillQuestion, DrillSentence};
use crate::models::verb::Verb;
use crate::models::{JlptLevel, WordType};
use crate::persistence::db::Database;
use crate::persistence::drill_repo::DrillRepo;
use crate::persistence::verb_repo::VerbRepo;
use crate::Result;

use super::options::generate_mc_options;

/// Parameters of one sentence drill request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillRequest {
    /// Level of sentences to draw from.
    pub level: JlptLevel,
    /// Word types to include.
    pub word_types: Vec<WordType>,
    /// Desired number of questions.
    pub count: usize,
}

/// Builds sentence drills from the `drill_sentences`, `drill_prompts` and
/// `verbs` tables.
#[derive(Clone)]
pub struct SentenceDrillGenerator {
    drills: DrillRepo,
    verbs: VerbRepo,
    max_attempts: usize,
}

impl SentenceDrillGenerator {
    /// Create a generator that gives up after `max_attempts` samples.
    #[must_use]
    pub fn new(db: Arc<Database>, max_attempts: usize) -> Self {
        Self {
            drills: DrillRepo::new(Arc::clone(&db)),
            verbs: VerbRepo::new(db),
            max_attempts,
        }
    }

    /// Fetch candidates and build up to `request.count` questions.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if fetching candidates fails.
    pub async fn generate(&self, request: &DrillRequest) -> Result<Vec<DrillQuestion>> {
        let sentences = self
            .drills
            .list_sentences(request.level, &request.word_types)
            .await?;
        let prompts = self.drills.list_prompts(&request.word_types).await?;

        let mut forms: Vec<String> = sentences.iter().map(|s| s.dictionary_form.clone()).collect();
        forms.sort_unstable();
        forms.dedup();
        let verbs = self.verbs.list_by_dictionary_forms(&forms).await?;

        debug!(
            sentences = sentences.len(),
            prompts = prompts.len(),
            verbs = verbs.len(),
            "drill candidates fetched"
        );

        let mut rng = StdRng::from_entropy();
        let questions = build_questions(
            &mut rng,
            &sentences,
            &prompts,
            &verbs,
            request.count,
            self.max_attempts,
        );
        info!(
            level = %request.level,
            requested = request.count,
            generated = questions.len(),
            "sentence drill generated"
        );
        Ok(questions)
    }
}

/// Sample questions from pre-fetched candidates.
///
/// Each attempt picks a random sentence and a random prompt compatible with
/// it: the prompt covers the sentence's word type and the verb carries the
/// prompt's target form. An attempt is discarded when it repeats a
/// sentence+prompt pair, when the verb is missing, or when no prompt fits.
/// Sampling stops after `count` questions or `max_attempts` attempts,
/// whichever comes first.
pub fn build_questions<R: Rng + ?Sized>(
    rng: &mut R,
    sentences: &[DrillSentence],
    prompts: &[DrillPrompt],
    verbs: &[Verb],
    count: usize,
    max_attempts: usize,
) -> Vec<DrillQuestion> {
    let verbs_by_form: HashMap<&str, &Verb> = verbs
        .iter()
        .map(|verb| (verb.dictionary_form.as_str(), verb))
        .collect();

    let mut questions = Vec::with_capacity(count);
    let mut used: HashSet<(&str, &str)> = HashSet::new();
    let mut attempts = 0;

    while questions.len() < count && attempts < max_attempts {
        attempts += 1;

        let Some(sentence) = sentences.choose(rng) else {
            break;
        };
        let Some(verb) = verbs_by_form.get(sentence.dictionary_form.as_str()) else {
            continue;
        };
        let compatible: Vec<&DrillPrompt> = prompts
            .iter()
            .filter(|p| {
                p.applies_to(sentence.word_type) && verb.conjugations.contains_key(&p.target_form)
            })
            .collect();
        let Some(&prompt) = compatible.choose(rng) else {
            continue;
        };

        let key = (sentence.id.as_str(), prompt.id.as_str());
        if used.contains(&key) {
            continue;
        }
        let Some(correct) = verb.conjugation(&prompt.target_form) else {
            continue;
        };

        used.insert(key);
        let options = generate_mc_options(rng, correct, &verb.conjugations, &prompt.target_form);
        questions.push(DrillQuestion {
            id: Uuid::new_v4().to_string(),
            sentence_id: sentence.id.clone(),
            prompt_id: prompt.id.clone(),
            dictionary_form: verb.dictionary_form.clone(),
            japanese: sentence.japanese.clone(),
            english: sentence.english.clone(),
            prompt: prompt.prompt_text.clone(),
            target_form: prompt.target_form.clone(),
            correct_answer: correct.kanji.clone(),
            reading: correct.reading.clone(),
            romaji: correct.romaji.clone(),
            options,
        });
    }

    debug!(attempts, generated = questions.len(), "sampling finished");
    questions
}
