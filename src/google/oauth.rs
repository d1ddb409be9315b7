//! OAuth2 authorization-code client for Google.

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GoogleConfig;
use crate::{AppError, Result};

/// Token endpoint response for both code exchange and refresh.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// New bearer token.
    pub access_token: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: i64,
    /// Present on code exchange, and on refresh when Google rotates it.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: Option<String>,
    /// Usually `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Thin client over the Google authorization and token endpoints.
#[derive(Clone)]
pub struct OAuthClient {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl OAuthClient {
    /// Create a client sharing `http`'s connection pool.
    #[must_use]
    pub fn new(config: GoogleConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(AppError::Config("google oauth client is not configured".into()))
        }
    }

    /// Consent-screen URL carrying `state`.
    ///
    /// Requests offline access with forced consent so Google always returns
    /// a refresh token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the client is unconfigured or the
    /// authorization URL is invalid.
    pub fn authorization_url(&self, state: &str) -> Result<String> {
        self.ensure_configured()?;
        let scope = self.config.scopes.join(" ");
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|err| AppError::Config(format!("invalid google.auth_url: {err}")))?;
        Ok(url.into())
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if Google rejects the code, or
    /// `AppError::Upstream` on transport and server failures.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        self.ensure_configured()?;
        let form = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self.http.post(&self.config.token_url).form(&form).send().await?;
        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "authorization code rejected");
            return Err(AppError::BadRequest("authorization code rejected".into()));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(format!("token exchange failed: {status}")));
        }
        debug!("authorization code exchanged");
        Ok(response.json().await?)
    }

    /// Mint a new access token from a refresh token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the refresh token was revoked, or
    /// `AppError::Upstream` on transport and server failures.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        self.ensure_configured()?;
        let form = [
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let response = self.http.post(&self.config.token_url).form(&form).send().await?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "refresh token rejected");
            return Err(AppError::Unauthorized(
                "google authorization expired; reconnect the account".into(),
            ));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(format!("token refresh failed: {status}")));
        }
        Ok(response.json().await?)
    }
}
