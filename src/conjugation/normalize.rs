//! Input normalization applied before comparing answers.

use unicode_normalization::UnicodeNormalization;

/// NFKC-normalize `input` and drop every whitespace character.
///
/// Full-width letters and digits fold to ASCII, half-width katakana folds
/// to full-width, and ideographic spaces disappear along with ASCII ones.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.nfkc().filter(|c| !c.is_whitespace()).collect()
}

/// [`normalize`] followed by lowercasing, for romaji comparison.
#[must_use]
pub fn normalize_romaji(input: &str) -> String {
    normalize(input).to_lowercase()
}
