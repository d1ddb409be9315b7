//! Random conjugation drill: verb + target form pairs without sentences.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::models::drill::RandomDrillItem;
use crate::models::verb::{form_label, Verb};
use crate::models::{JlptLevel, WordType};
use crate::persistence::db::Database;
use crate::persistence::verb_repo::VerbRepo;
use crate::Result;

use super::options::generate_mc_options;

/// Parameters of one random drill request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomDrillRequest {
    /// Restrict verbs to one level.
    pub level: Option<JlptLevel>,
    /// Restrict verbs to these word types; empty means all.
    pub word_types: Vec<WordType>,
    /// Restrict target forms to these keys; empty means every form a verb has.
    pub forms: Vec<String>,
    /// Desired number of items.
    pub count: usize,
}

/// Builds random drills from the `verbs` table.
#[derive(Clone)]
pub struct RandomDrillGenerator {
    verbs: VerbRepo,
    max_attempts: usize,
}

impl RandomDrillGenerator {
    /// Create a generator with a lower bound of `max_attempts` samples.
    #[must_use]
    pub fn new(db: Arc<Database>, max_attempts: usize) -> Self {
        Self {
            verbs: VerbRepo::new(db),
            max_attempts,
        }
    }

    /// Fetch verbs and build up to `request.count` items.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if fetching verbs fails.
    pub async fn generate(&self, request: &RandomDrillRequest) -> Result<Vec<RandomDrillItem>> {
        let verbs = self.verbs.list(request.level, &request.word_types).await?;
        let mut rng = StdRng::from_entropy();
        let items = build_items(&mut rng, &verbs, &request.forms, request.count, self.max_attempts);
        info!(
            requested = request.count,
            generated = items.len(),
            pool = verbs.len(),
            "random drill generated"
        );
        Ok(items)
    }
}

/// Sample distinct verb + target form pairs.
///
/// The attempt budget is the larger of `max_attempts` and ten times
/// `count`, so larger requests still fill when enough pairs exist. A pair
/// is never emitted twice.
pub fn build_items<R: Rng + ?Sized>(
    rng: &mut R,
    verbs: &[Verb],
    forms: &[String],
    count: usize,
    max_attempts: usize,
) -> Vec<RandomDrillItem> {
    let budget = max_attempts.max(count.saturating_mul(10));
    let mut used: HashSet<(&str, &str)> = HashSet::new();
    let mut items = Vec::with_capacity(count);
    let mut attempts = 0;

    while items.len() < count && attempts < budget {
        attempts += 1;

        let Some(verb) = verbs.choose(rng) else {
            break;
        };
        let keys: Vec<&String> = verb
            .conjugations
            .keys()
            .filter(|key| forms.is_empty() || forms.contains(key))
            .collect();
        let Some(&key) = keys.choose(rng) else {
            continue;
        };

        let pair = (verb.dictionary_form.as_str(), key.as_str());
        if !used.insert(pair) {
            continue;
        }

        let Some(answer) = verb.conjugation(key) else {
            continue;
        };
        let options = generate_mc_options(rng, answer, &verb.conjugations, key);
        items.push(RandomDrillItem {
            dictionary_form: verb.dictionary_form.clone(),
            reading: verb.reading.clone(),
            meaning: verb.meaning.clone(),
            word_type: verb.word_type,
            target_form: key.clone(),
            target_label: form_label(key).to_owned(),
            answer: answer.clone(),
            options,
        });
    }

    items
}
