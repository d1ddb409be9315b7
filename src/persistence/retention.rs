//! Retention service for abandoned OAuth authorization states.
//!
//! Runs as a background task deleting `oauth_states` rows that outlived
//! the configured time-to-live without a callback.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::db::Database;
use super::oauth_state_repo::OAuthStateRepo;
use crate::Result;

const PURGE_INTERVAL: Duration = Duration::from_secs(600);

/// Spawn the OAuth state purge background task.
///
/// The task runs every ten minutes until `cancel` fires.
#[must_use]
pub fn spawn_retention_task(
    db: Arc<Database>,
    state_ttl_minutes: u32,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let repo = OAuthStateRepo::new(db);
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("retention task shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(err) = purge(&repo, state_ttl_minutes).await {
                        error!(?err, "retention purge failed");
                    }
                }
            }
        }
    })
}

/// Delete OAuth states older than `state_ttl_minutes`.
///
/// # Errors
///
/// Returns `AppError::Db` if the delete fails.
pub async fn purge(repo: &OAuthStateRepo, state_ttl_minutes: u32) -> Result<u64> {
    let cutoff = Utc::now() - chrono::Duration::minutes(i64::from(state_ttl_minutes));
    let deleted = repo.purge(cutoff).await?;
    debug!(deleted, state_ttl_minutes, "oauth state purge completed");
    Ok(deleted)
}
