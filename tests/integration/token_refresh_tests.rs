//! Integration tests for refresh-before-expiry during reminder sync.
//!
//! Google's token, Calendar and Tasks endpoints are served by wiremock.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nihongo_api::models::google::GoogleToken;
use nihongo_api::persistence::db;
use nihongo_api::persistence::token_repo::TokenRepo;

use super::test_helpers::{
    seeded_db, spawn_server, test_app_state, test_config_with_upstream, TestServer,
};

const EVENTS_PATH: &str = "/calendar/v3/calendars/primary/events";
const TASKS_PATH: &str = "/tasks/v1/lists/@default/tasks";

async fn server_with_token(mock: &MockServer, expires_in: Duration) -> TestServer {
    let db = seeded_db().await;
    let now = Utc::now();
    TokenRepo::new(Arc::clone(&db))
        .upsert(&GoogleToken {
            user_id: "learner-1".into(),
            access_token: "ya29.stale".into(),
            refresh_token: "stored-refresh".into(),
            expires_at: now + expires_in,
            scope: None,
            updated_at: now,
        })
        .await
        .expect("store token");
    spawn_server(test_app_state(test_config_with_upstream(&mock.uri()), db)).await
}

async fn sync(server: &TestServer, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(server.url("/api/google-calendar/sync"))
        .json(body)
        .send()
        .await
        .expect("POST sync")
}

async fn stored_token(server: &TestServer) -> GoogleToken {
    TokenRepo::new(Arc::clone(&server.state.db))
        .get("learner-1")
        .await
        .expect("get")
        .expect("stored")
}

#[tokio::test]
async fn expired_token_is_refreshed_and_persisted_before_calendar_call() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=stored-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.fresh",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .and(header("authorization", "Bearer ya29.fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt-1"})))
        .expect(2)
        .mount(&mock)
        .await;
    let server = server_with_token(&mock, -Duration::minutes(5)).await;

    let resp = sync(&server, &json!({"userId": "learner-1", "date": "2024-09-01"})).await;

    assert_eq!(resp.status(), 200);
    let report: Value = resp.json().await.expect("json");
    assert_eq!(report["date"], "2024-09-01");
    assert_eq!(report["eventsCreated"], json!(["evt-1", "evt-1"]));
    assert_eq!(report["tasksCreated"], json!([]));

    let token = stored_token(&server).await;
    assert_eq!(token.access_token, "ya29.fresh");
    assert_eq!(token.refresh_token, "stored-refresh");
    assert!(token.expires_at > Utc::now() + Duration::minutes(55));

    mock.verify().await;
}

#[tokio::test]
async fn token_inside_skew_window_is_refreshed() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.fresh",
            "expires_in": 3600,
            "refresh_token": "rotated-refresh"
        })))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .and(header("authorization", "Bearer ya29.fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt-2"})))
        .mount(&mock)
        .await;
    let server = server_with_token(&mock, Duration::seconds(30)).await;

    let resp = sync(&server, &json!({"userId": "learner-1"})).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(stored_token(&server).await.refresh_token, "rotated-refresh");
    mock.verify().await;
}

#[tokio::test]
async fn valid_token_is_used_without_refresh() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .and(header("authorization", "Bearer ya29.stale"))
        .and(body_string_contains(r#""start":{"date":"2024-09-02","timeZone":"UTC"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt-3"})))
        .expect(2)
        .mount(&mock)
        .await;
    let server = server_with_token(&mock, Duration::hours(1)).await;

    let resp = sync(&server, &json!({"userId": "learner-1", "date": "2024-09-02"})).await;

    assert_eq!(resp.status(), 200);
    mock.verify().await;
}

#[tokio::test]
async fn create_tasks_adds_a_task_per_pick() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt-4"})))
        .expect(2)
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .and(path(TASKS_PATH))
        .and(header("authorization", "Bearer ya29.stale"))
        .and(body_string_contains("2024-09-03T00:00:00.000Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "task-1"})))
        .expect(2)
        .mount(&mock)
        .await;
    let server = server_with_token(&mock, Duration::hours(1)).await;

    let resp = sync(
        &server,
        &json!({"userId": "learner-1", "date": "2024-09-03", "createTasks": true}),
    )
    .await;

    assert_eq!(resp.status(), 200);
    let report: Value = resp.json().await.expect("json");
    assert_eq!(report["tasksCreated"], json!(["task-1", "task-1"]));
    mock.verify().await;
}

#[tokio::test]
async fn revoked_refresh_token_is_401() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "never"})))
        .expect(0)
        .mount(&mock)
        .await;
    let server = server_with_token(&mock, -Duration::minutes(1)).await;

    let resp = sync(&server, &json!({"userId": "learner-1"})).await;

    assert_eq!(resp.status(), 401);
    assert_eq!(stored_token(&server).await.access_token, "ya29.stale");
    mock.verify().await;
}

#[tokio::test]
async fn calendar_rejecting_token_is_401() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock)
        .await;
    let server = server_with_token(&mock, Duration::hours(1)).await;

    let resp = sync(&server, &json!({"userId": "learner-1"})).await;

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn unconnected_user_is_401() {
    let mock = MockServer::start().await;
    let server = server_with_token(&mock, Duration::hours(1)).await;

    let resp = sync(&server, &json!({"userId": "someone-else"})).await;

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn nothing_to_sync_is_404() {
    let mock = MockServer::start().await;
    let empty = Arc::new(db::connect_memory().await.expect("db"));
    let server = spawn_server(test_app_state(test_config_with_upstream(&mock.uri()), empty)).await;

    let resp = sync(&server, &json!({"userId": "learner-1"})).await;

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn sync_requires_user_id() {
    let mock = MockServer::start().await;
    let server = server_with_token(&mock, Duration::hours(1)).await;

    let resp = sync(&server, &json!({"date": "2024-09-01"})).await;

    assert_eq!(resp.status(), 400);
}
