//! Google OAuth2, Calendar and Tasks integration.

pub mod calendar;
pub mod oauth;
pub mod sync;
pub mod tokens;

pub use calendar::CalendarClient;
pub use oauth::{OAuthClient, TokenResponse};
pub use sync::{ReminderSync, SyncReport};
pub use tokens::TokenManager;
