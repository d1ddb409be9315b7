//! Unit tests for pending OAuth state storage and purge.

use std::sync::Arc;

use chrono::{Duration, Utc};
use nihongo_api::models::google::OAuthState;
use nihongo_api::persistence::{db, oauth_state_repo::OAuthStateRepo, retention};

fn state_created(user_id: &str, minutes_ago: i64) -> OAuthState {
    let mut state = OAuthState::new(user_id.to_owned());
    state.created_at = Utc::now() - Duration::minutes(minutes_ago);
    state
}

#[tokio::test]
async fn take_consumes_state_once() {
    let db = db::connect_memory().await.expect("db");
    let repo = OAuthStateRepo::new(Arc::new(db));
    let state = OAuthState::new("user-1".into());
    repo.insert(&state).await.expect("insert");

    let taken = repo.take(&state.state).await.expect("take").expect("present");
    assert_eq!(taken.user_id, "user-1");
    assert_eq!(taken.state, state.state);

    assert!(repo.take(&state.state).await.expect("take again").is_none());
}

#[tokio::test]
async fn take_unknown_state_is_none() {
    let db = db::connect_memory().await.expect("db");
    let repo = OAuthStateRepo::new(Arc::new(db));

    assert!(repo.take("never-issued").await.expect("take").is_none());
}

#[tokio::test]
async fn purge_removes_only_stale_states() {
    let db = db::connect_memory().await.expect("db");
    let repo = OAuthStateRepo::new(Arc::new(db));
    let stale = state_created("user-1", 30);
    let fresh = state_created("user-2", 1);
    repo.insert(&stale).await.expect("insert stale");
    repo.insert(&fresh).await.expect("insert fresh");

    let deleted = retention::purge(&repo, 15).await.expect("purge");

    assert_eq!(deleted, 1);
    assert!(repo.take(&stale.state).await.expect("take").is_none());
    assert!(repo.take(&fresh.state).await.expect("take").is_some());
}
