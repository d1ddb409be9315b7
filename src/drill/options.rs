//! Multiple-choice option construction.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::verb::Conjugation;

use super::DISTRACTOR_COUNT;

/// Build the shuffled option list for one question.
///
/// The result holds `correct.kanji` exactly once plus up to three distinct
/// distractors taken from the other forms in `conjugations`. Forms whose
/// text equals the correct answer are never offered as distractors.
pub fn generate_mc_options<R: Rng + ?Sized>(
    rng: &mut R,
    correct: &Conjugation,
    conjugations: &BTreeMap<String, Conjugation>,
    target_key: &str,
) -> Vec<String> {
    let mut candidates: Vec<&str> = Vec::new();
    for (key, conjugation) in conjugations {
        let text = conjugation.kanji.as_str();
        if key == target_key || text == correct.kanji || candidates.contains(&text) {
            continue;
        }
        candidates.push(text);
    }

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|text| (*text).to_owned())
        .collect();
    options.push(correct.kanji.clone());
    options.shuffle(rng);
    options
}
