//! Stored Google OAuth tokens and pending authorization states.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// OAuth tokens for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoogleToken {
    /// Owning user; unique key.
    pub user_id: String,
    /// Bearer token for Calendar / Tasks calls.
    pub access_token: String,
    /// Long-lived token used to mint new access tokens.
    pub refresh_token: String,
    /// Access token expiry.
    pub expires_at: DateTime<Utc>,
    /// Granted scopes, space separated.
    pub scope: Option<String>,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}

impl GoogleToken {
    /// Whether the access token expires within `skew` of `now`.
    #[must_use]
    pub fn expires_within(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        self.expires_at <= now + skew
    }
}

/// Pending authorization request, keyed by the `state` parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OAuthState {
    /// Random opaque value echoed back by Google.
    pub state: String,
    /// User who started the flow.
    pub user_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl OAuthState {
    /// Construct a state with a random value.
    #[must_use]
    pub fn new(user_id: String) -> Self {
        Self {
            state: Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Whether the state is older than `ttl` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.created_at + ttl < now
    }
}
