//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Keyring service name under which secrets are stored.
const KEYRING_SERVICE: &str = "nihongo-api";

/// Drill generation limits.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DrillConfig {
    /// Number of questions when the caller does not ask for a count.
    #[serde(default = "default_count")]
    pub default_count: usize,
    /// Largest count a caller may request.
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    /// Sampling attempts before the generator gives up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            max_count: default_max_count(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_count() -> usize {
    10
}

fn default_max_count() -> usize {
    50
}

fn default_max_attempts() -> usize {
    100
}

/// Google OAuth2, Calendar and Tasks settings.
///
/// The client secret is loaded at runtime via OS keychain or environment
/// variable, never from the TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GoogleConfig {
    /// OAuth client identifier; empty disables the calendar integration.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret (populated at runtime).
    #[serde(skip)]
    pub client_secret: String,
    /// Fixed redirect URI registered with Google.
    #[serde(default)]
    pub redirect_uri: String,
    /// Authorization endpoint.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Token exchange and refresh endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Calendar v3 API base.
    #[serde(default = "default_calendar_api_base")]
    pub calendar_api_base: String,
    /// Tasks v1 API base.
    #[serde(default = "default_tasks_api_base")]
    pub tasks_api_base: String,
    /// Requested OAuth scopes.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Minutes an authorization `state` stays valid.
    #[serde(default = "default_state_ttl_minutes")]
    pub state_ttl_minutes: u32,
    /// IANA time zone attached to reminder events.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            calendar_api_base: default_calendar_api_base(),
            tasks_api_base: default_tasks_api_base(),
            scopes: default_scopes(),
            state_ttl_minutes: default_state_ttl_minutes(),
            timezone: default_timezone(),
        }
    }
}

impl GoogleConfig {
    /// Whether enough settings are present to run the OAuth flow.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".into()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".into()
}

fn default_calendar_api_base() -> String {
    "https://www.googleapis.com/calendar/v3".into()
}

fn default_tasks_api_base() -> String {
    "https://tasks.googleapis.com/tasks/v1".into()
}

fn default_scopes() -> Vec<String> {
    vec![
        "https://www.googleapis.com/auth/calendar.events".into(),
        "https://www.googleapis.com/auth/tasks".into(),
    ]
}

fn default_state_ttl_minutes() -> u32 {
    15
}

fn default_timezone() -> String {
    "UTC".into()
}

/// Kanji data API (RapidAPI-hosted) settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct KanjiApiConfig {
    /// API base URL.
    #[serde(default = "default_kanji_base_url")]
    pub base_url: String,
    /// Value sent as `X-RapidAPI-Host`.
    #[serde(default = "default_kanji_host")]
    pub host: String,
    /// RapidAPI key (populated at runtime).
    #[serde(skip)]
    pub api_key: String,
}

impl Default for KanjiApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_kanji_base_url(),
            host: default_kanji_host(),
            api_key: String::new(),
        }
    }
}

fn default_kanji_base_url() -> String {
    "https://kanjialive-api.p.rapidapi.com".into()
}

fn default_kanji_host() -> String {
    "kanjialive-api.p.rapidapi.com".into()
}

fn default_http_host() -> String {
    "127.0.0.1".into()
}

fn default_http_port() -> u16 {
    3000
}

fn default_db_path() -> PathBuf {
    PathBuf::from("nihongo.db")
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_http_host")]
    pub http_host: String,
    /// HTTP port for the API server.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// `SQLite` database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Drill generation limits.
    #[serde(default)]
    pub drill: DrillConfig,
    /// Google Calendar / Tasks integration.
    #[serde(default)]
    pub google: GoogleConfig,
    /// Kanji lookup API.
    #[serde(default)]
    pub kanji_api: KanjiApiConfig,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load API secrets from OS keychain with env-var fallback.
    ///
    /// Missing secrets are not fatal: the dependent feature reports itself
    /// as unconfigured at request time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the keychain task cannot be joined.
    pub async fn load_credentials(&mut self) -> Result<()> {
        if let Some(secret) = load_credential("google_client_secret", "GOOGLE_CLIENT_SECRET").await? {
            self.google.client_secret = secret;
        } else if !self.google.client_id.is_empty() {
            warn!("google client secret not found; calendar sync disabled");
        }

        if let Some(key) = load_credential("rapidapi_key", "RAPIDAPI_KEY").await? {
            self.kanji_api.api_key = key;
        } else {
            warn!("rapidapi key not found; kanji lookups served from cache only");
        }
        Ok(())
    }

    /// Socket address string the HTTP server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    fn validate(&self) -> Result<()> {
        if self.drill.max_count == 0 {
            return Err(AppError::Config(
                "drill.max_count must be greater than zero".into(),
            ));
        }

        if self.drill.default_count == 0 || self.drill.default_count > self.drill.max_count {
            return Err(AppError::Config(
                "drill.default_count must be between 1 and drill.max_count".into(),
            ));
        }

        if self.drill.max_attempts == 0 {
            return Err(AppError::Config(
                "drill.max_attempts must be greater than zero".into(),
            ));
        }

        if !self.google.client_id.is_empty() && self.google.redirect_uri.is_empty() {
            return Err(AppError::Config(
                "google.redirect_uri is required when google.client_id is set".into(),
            ));
        }

        Ok(())
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<Option<String>> {
    let key = keyring_key.to_owned();

    // keyring is synchronous I/O.
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(KEYRING_SERVICE, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(Some(value)),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(err) => {
            tracing::debug!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    Ok(env::var(env_key).ok().filter(|value| !value.is_empty()))
}
