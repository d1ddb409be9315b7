//! Cache-through kanji lookup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::models::kanji::Kanji;
use crate::persistence::db::Database;
use crate::persistence::kanji_repo::KanjiRepo;
use crate::{AppError, Result};

use super::client::KanjiApiClient;

/// CJK ideograph blocks plus the iteration mark 々.
fn is_kanji(c: char) -> bool {
    matches!(
        c,
        '\u{3005}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2FA1F}'
    )
}

/// Serves kanji from the `kanji` table, filling misses from the API.
#[derive(Clone)]
pub struct KanjiLookup {
    repo: KanjiRepo,
    client: KanjiApiClient,
}

impl KanjiLookup {
    /// Create a lookup over `db` backed by `client`.
    #[must_use]
    pub fn new(db: Arc<Database>, client: KanjiApiClient) -> Self {
        Self {
            repo: KanjiRepo::new(db),
            client,
        }
    }

    /// Return the record for `character`, fetching and caching it on a miss.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` unless `character` is exactly one CJK
    /// ideograph, `AppError::NotFound` if neither cache nor API knows it.
    pub async fn get(&self, character: &str) -> Result<Kanji> {
        let character = character.trim();
        let mut chars = character.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(AppError::BadRequest(
                "expected exactly one kanji character".into(),
            ));
        };
        if !is_kanji(c) {
            return Err(AppError::BadRequest(format!("not a kanji: {character}")));
        }

        if let Some(cached) = self.repo.get(character).await? {
            debug!(character, "kanji cache hit");
            return Ok(cached);
        }

        if !self.client.is_configured() {
            return Err(AppError::NotFound(format!("kanji not found: {character}")));
        }

        let fetched = self.client.fetch(character).await?;
        self.repo.upsert(&fetched).await?;
        info!(character, "kanji fetched and cached");
        Ok(fetched)
    }
}
