//! Integration tests for the Google OAuth connect / disconnect flow.
//!
//! Google's token endpoint is served by wiremock.

use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::Url;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nihongo_api::models::google::OAuthState;
use nihongo_api::persistence::oauth_state_repo::OAuthStateRepo;
use nihongo_api::persistence::token_repo::TokenRepo;

use super::test_helpers::{
    seeded_db, spawn_default, spawn_server, test_app_state, test_config_with_upstream, TestServer,
};

async fn server_with_mock() -> (MockServer, TestServer) {
    let mock = MockServer::start().await;
    let state = test_app_state(test_config_with_upstream(&mock.uri()), seeded_db().await);
    let server = spawn_server(state).await;
    (mock, server)
}

async fn start_auth(server: &TestServer, user_id: &str) -> Url {
    let resp = reqwest::get(server.url(&format!("/api/google-calendar/auth?userId={user_id}")))
        .await
        .expect("GET auth");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json");
    Url::parse(body["url"].as_str().expect("url")).expect("valid url")
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

async fn mount_code_exchange(mock: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.first",
            "expires_in": 3599,
            "refresh_token": "refresh-1",
            "scope": "https://www.googleapis.com/auth/calendar.events",
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(mock)
        .await;
}

#[tokio::test]
async fn auth_url_requests_offline_consent() {
    let (_mock, server) = server_with_mock().await;

    let url = start_auth(&server, "learner-1").await;

    assert_eq!(url.path(), "/o/oauth2/v2/auth");
    assert_eq!(
        query_param(&url, "client_id").as_deref(),
        Some("test-client.apps.googleusercontent.com")
    );
    assert_eq!(query_param(&url, "response_type").as_deref(), Some("code"));
    assert_eq!(query_param(&url, "access_type").as_deref(), Some("offline"));
    assert_eq!(query_param(&url, "prompt").as_deref(), Some("consent"));
    assert!(query_param(&url, "scope").expect("scope").contains("calendar.events"));
    assert!(!query_param(&url, "state").expect("state").is_empty());
}

#[tokio::test]
async fn callback_stores_tokens_for_state_owner() {
    let (mock, server) = server_with_mock().await;
    mount_code_exchange(&mock).await;

    let url = start_auth(&server, "learner-1").await;
    let state = query_param(&url, "state").expect("state");

    let resp = reqwest::get(server.url(&format!(
        "/api/google-calendar/callback?code=auth-code-1&state={state}"
    )))
    .await
    .expect("GET callback");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body, json!({"connected": true, "userId": "learner-1"}));

    let token = TokenRepo::new(Arc::clone(&server.state.db))
        .get("learner-1")
        .await
        .expect("get")
        .expect("stored");
    assert_eq!(token.access_token, "ya29.first");
    assert_eq!(token.refresh_token, "refresh-1");
    assert!(token.expires_at > Utc::now() + Duration::minutes(50));

    let status: Value = reqwest::get(server.url("/api/google-calendar/status?userId=learner-1"))
        .await
        .expect("GET status")
        .json()
        .await
        .expect("json");
    assert_eq!(status["connected"], true);
    assert!(status["expiresAt"].is_string());

    mock.verify().await;
}

#[tokio::test]
async fn state_cannot_be_replayed() {
    let (mock, server) = server_with_mock().await;
    mount_code_exchange(&mock).await;

    let url = start_auth(&server, "learner-1").await;
    let state = query_param(&url, "state").expect("state");
    let callback = server.url(&format!(
        "/api/google-calendar/callback?code=auth-code-1&state={state}"
    ));

    let first = reqwest::get(&callback).await.expect("first callback");
    let second = reqwest::get(&callback).await.expect("second callback");

    assert_eq!(first.status(), 200);
    assert_eq!(second.status(), 400);
    assert_eq!(
        second.json::<Value>().await.expect("json")["error"],
        "unknown authorization state"
    );
}

#[tokio::test]
async fn unknown_state_is_rejected_before_exchange() {
    let (mock, server) = server_with_mock().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let resp = reqwest::get(server.url("/api/google-calendar/callback?code=x&state=forged"))
        .await
        .expect("GET callback");

    assert_eq!(resp.status(), 400);
    mock.verify().await;
}

#[tokio::test]
async fn expired_state_is_rejected() {
    let (_mock, server) = server_with_mock().await;
    let mut stale = OAuthState::new("learner-1".into());
    stale.created_at = Utc::now() - Duration::minutes(30);
    OAuthStateRepo::new(Arc::clone(&server.state.db))
        .insert(&stale)
        .await
        .expect("insert state");

    let resp = reqwest::get(server.url(&format!(
        "/api/google-calendar/callback?code=x&state={}",
        stale.state
    )))
    .await
    .expect("GET callback");

    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.json::<Value>().await.expect("json")["error"],
        "authorization state expired"
    );
}

#[tokio::test]
async fn denied_consent_is_400() {
    let (_mock, server) = server_with_mock().await;

    let resp = reqwest::get(server.url("/api/google-calendar/callback?error=access_denied&state=s"))
        .await
        .expect("GET callback");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn rejected_code_is_400() {
    let (mock, server) = server_with_mock().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&mock)
        .await;

    let url = start_auth(&server, "learner-1").await;
    let state = query_param(&url, "state").expect("state");
    let resp = reqwest::get(server.url(&format!(
        "/api/google-calendar/callback?code=stale&state={state}"
    )))
    .await
    .expect("GET callback");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn disconnect_forgets_tokens() {
    let (mock, server) = server_with_mock().await;
    mount_code_exchange(&mock).await;
    let url = start_auth(&server, "learner-1").await;
    let state = query_param(&url, "state").expect("state");
    reqwest::get(server.url(&format!(
        "/api/google-calendar/callback?code=auth-code-1&state={state}"
    )))
    .await
    .expect("GET callback");

    let client = reqwest::Client::new();
    let disconnect = server.url("/api/google-calendar/disconnect?userId=learner-1");
    let first = client.delete(&disconnect).send().await.expect("DELETE");
    let second = client.delete(&disconnect).send().await.expect("DELETE again");

    assert_eq!(first.status(), 204);
    assert_eq!(second.status(), 404);
    let status: Value = reqwest::get(server.url("/api/google-calendar/status?userId=learner-1"))
        .await
        .expect("GET status")
        .json()
        .await
        .expect("json");
    assert_eq!(status, json!({"connected": false}));
}

#[tokio::test]
async fn auth_without_google_config_is_500() {
    let server = spawn_default().await;

    let resp = reqwest::get(server.url("/api/google-calendar/auth?userId=learner-1"))
        .await
        .expect("GET auth");

    assert_eq!(resp.status(), 500);
    assert_eq!(
        resp.json::<Value>().await.expect("json")["error"],
        "internal server error"
    );
}

#[tokio::test]
async fn auth_without_user_is_400() {
    let (_mock, server) = server_with_mock().await;

    let resp = reqwest::get(server.url("/api/google-calendar/auth")).await.expect("GET auth");

    assert_eq!(resp.status(), 400);
}
