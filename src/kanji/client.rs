//! HTTP client for the RapidAPI-hosted kanji data API.

use chrono::Utc;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::KanjiApiConfig;
use crate::models::kanji::Kanji;
use crate::{AppError, Result};

#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    kanji: Option<ApiKanji>,
    #[serde(default)]
    references: Option<ApiReferences>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiKanji {
    #[serde(default)]
    meaning: ApiMeaning,
    #[serde(default)]
    strokes: ApiStrokes,
    #[serde(default)]
    onyomi: ApiOnyomi,
    #[serde(default)]
    kunyomi: ApiKunyomi,
}

#[derive(Debug, Default, Deserialize)]
struct ApiMeaning {
    #[serde(default)]
    english: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiStrokes {
    #[serde(default)]
    count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiOnyomi {
    #[serde(default)]
    katakana: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiKunyomi {
    #[serde(default)]
    hiragana: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiReferences {
    #[serde(default)]
    grade: Option<u32>,
}

/// Split a reading list such as `シン、ジン` or `おや, した(しい)`.
fn split_readings(raw: &str) -> Vec<String> {
    raw.split(['、', ','])
        .map(str::trim)
        .filter(|r| !r.is_empty() && *r != "n/a")
        .map(str::to_owned)
        .collect()
}

/// Build `{base}/api/public/kanji/{character}` with `character` escaped as a
/// single path segment.
fn kanji_url(base: &str, character: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|err| AppError::Config(format!("invalid kanji_api.base_url: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| AppError::Config("kanji_api.base_url cannot be a base".into()))?
        .pop_if_empty()
        .extend(["api", "public", "kanji", character]);
    Ok(url)
}

/// Client for `GET {base_url}/api/public/kanji/{character}`.
#[derive(Clone)]
pub struct KanjiApiClient {
    config: KanjiApiConfig,
    http: reqwest::Client,
}

impl KanjiApiClient {
    /// Create a client sharing `http`'s connection pool.
    #[must_use]
    pub fn new(config: KanjiApiConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Whether an API key is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Fetch and normalize one kanji.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the API does not know the character,
    /// `AppError::Config` if no API key is configured, or
    /// `AppError::Upstream` on transport and server failures.
    pub async fn fetch(&self, character: &str) -> Result<Kanji> {
        if !self.is_configured() {
            return Err(AppError::Config("kanji api key is not configured".into()));
        }

        let url = kanji_url(&self.config.base_url, character)?;
        let response = self
            .http
            .get(url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("kanji not found: {character}")));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(format!("kanji api returned {status}")));
        }

        let body: ApiResponse = response.json().await?;
        if let Some(err) = body.error {
            debug!(character, %err, "kanji api reported an error");
            return Err(AppError::NotFound(format!("kanji not found: {character}")));
        }
        let Some(kanji) = body.kanji else {
            return Err(AppError::NotFound(format!("kanji not found: {character}")));
        };

        Ok(Kanji {
            character: character.to_owned(),
            meaning: kanji.meaning.english,
            onyomi: split_readings(&kanji.onyomi.katakana),
            kunyomi: split_readings(&kanji.kunyomi.hiragana),
            stroke_count: kanji.strokes.count,
            grade: body.references.and_then(|r| r.grade),
            jlpt_level: None,
            fetched_at: Utc::now(),
        })
    }
}
