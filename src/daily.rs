//! Word of the Day and Kanji of the Day selection.
//!
//! The pick for a date is the row at index `days_since_ce % row_count` in
//! key order, so every caller sees the same pick for the same date and
//! data set.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::models::kanji::Kanji;
use crate::models::verb::Verb;
use crate::models::JlptLevel;
use crate::persistence::db::Database;
use crate::persistence::kanji_repo::KanjiRepo;
use crate::persistence::verb_repo::VerbRepo;
use crate::Result;

/// Index of the daily pick among `count` rows, or `None` when empty.
#[must_use]
pub fn pick_index(date: NaiveDate, count: u64) -> Option<u64> {
    if count == 0 {
        return None;
    }
    let day = u64::try_from(date.num_days_from_ce()).unwrap_or_default();
    Some(day % count)
}

/// Deterministic daily selection over the verb and kanji tables.
#[derive(Clone)]
pub struct DailyPicker {
    verbs: VerbRepo,
    kanji: KanjiRepo,
}

impl DailyPicker {
    /// Create a picker over `db`.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            verbs: VerbRepo::new(Arc::clone(&db)),
            kanji: KanjiRepo::new(db),
        }
    }

    /// Word of the Day for `date`, optionally restricted to one level.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if a query fails.
    pub async fn word_of_the_day(
        &self,
        date: NaiveDate,
        level: Option<JlptLevel>,
    ) -> Result<Option<Verb>> {
        let count = self.verbs.count(level).await?;
        match pick_index(date, count) {
            Some(index) => self.verbs.nth(level, index).await,
            None => Ok(None),
        }
    }

    /// Kanji of the Day for `date`, optionally restricted to one level.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if a query fails.
    pub async fn kanji_of_the_day(
        &self,
        date: NaiveDate,
        level: Option<JlptLevel>,
    ) -> Result<Option<Kanji>> {
        let count = self.kanji.count(level).await?;
        match pick_index(date, count) {
            Some(index) => self.kanji.nth(level, index).await,
            None => Ok(None),
        }
    }
}
