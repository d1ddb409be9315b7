//! Unit tests for `TokenRepo`.

use std::sync::Arc;

use chrono::{Duration, DurationRound, Utc};
use nihongo_api::models::google::GoogleToken;
use nihongo_api::persistence::{db, token_repo::TokenRepo};

fn sample_token(user_id: &str) -> GoogleToken {
    let now = Utc::now()
        .duration_trunc(Duration::seconds(1))
        .expect("truncate");
    GoogleToken {
        user_id: user_id.to_owned(),
        access_token: "ya29.initial".into(),
        refresh_token: "1//refresh".into(),
        expires_at: now + Duration::hours(1),
        scope: Some("https://www.googleapis.com/auth/calendar.events".into()),
        updated_at: now,
    }
}

#[tokio::test]
async fn upsert_and_get_round_trip() {
    let db = db::connect_memory().await.expect("db");
    let repo = TokenRepo::new(Arc::new(db));
    let token = sample_token("user-1");

    repo.upsert(&token).await.expect("upsert");
    let loaded = repo.get("user-1").await.expect("get").expect("present");

    assert_eq!(loaded, token);
    assert!(repo.get("user-2").await.expect("get").is_none());
}

#[tokio::test]
async fn upsert_overwrites_existing_user() {
    let db = db::connect_memory().await.expect("db");
    let repo = TokenRepo::new(Arc::new(db));
    repo.upsert(&sample_token("user-1")).await.expect("first");

    let mut replacement = sample_token("user-1");
    replacement.access_token = "ya29.second".into();
    replacement.refresh_token = "1//second".into();
    repo.upsert(&replacement).await.expect("second");

    let loaded = repo.get("user-1").await.expect("get").expect("present");
    assert_eq!(loaded.access_token, "ya29.second");
    assert_eq!(loaded.refresh_token, "1//second");
}

#[tokio::test]
async fn update_access_token_keeps_refresh_token_when_not_rotated() {
    let db = db::connect_memory().await.expect("db");
    let repo = TokenRepo::new(Arc::new(db));
    let token = sample_token("user-1");
    repo.upsert(&token).await.expect("upsert");

    let new_expiry = token.expires_at + Duration::hours(2);
    repo.update_access_token("user-1", "ya29.refreshed", new_expiry, None)
        .await
        .expect("update");

    let loaded = repo.get("user-1").await.expect("get").expect("present");
    assert_eq!(loaded.access_token, "ya29.refreshed");
    assert_eq!(loaded.expires_at, new_expiry);
    assert_eq!(loaded.refresh_token, "1//refresh");
}

#[tokio::test]
async fn update_access_token_stores_rotated_refresh_token() {
    let db = db::connect_memory().await.expect("db");
    let repo = TokenRepo::new(Arc::new(db));
    let token = sample_token("user-1");
    repo.upsert(&token).await.expect("upsert");

    repo.update_access_token("user-1", "ya29.refreshed", token.expires_at, Some("1//rotated"))
        .await
        .expect("update");

    let loaded = repo.get("user-1").await.expect("get").expect("present");
    assert_eq!(loaded.refresh_token, "1//rotated");
}

#[tokio::test]
async fn delete_reports_whether_a_row_existed() {
    let db = db::connect_memory().await.expect("db");
    let repo = TokenRepo::new(Arc::new(db));
    repo.upsert(&sample_token("user-1")).await.expect("upsert");

    assert!(repo.delete("user-1").await.expect("delete"));
    assert!(!repo.delete("user-1").await.expect("delete again"));
    assert!(repo.get("user-1").await.expect("get").is_none());
}
