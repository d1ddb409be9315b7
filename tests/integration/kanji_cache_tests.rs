//! Integration tests for the cache-through kanji lookup.
//!
//! The kanji API is replaced by a wiremock server; call-count expectations
//! verify that cached characters never reach the upstream.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_helpers::{
    seeded_db, spawn_default, spawn_server, test_app_state, test_config_with_upstream,
};

fn api_body() -> Value {
    json!({
        "kanji": {
            "character": "山",
            "meaning": { "english": "mountain" },
            "strokes": { "count": 3 },
            "onyomi": { "romaji": "san", "katakana": "サン、セン" },
            "kunyomi": { "romaji": "yama", "hiragana": "やま" }
        },
        "references": { "grade": 1, "kodansha": "3", "classic_nelson": "1432" }
    })
}

#[tokio::test]
async fn miss_fetches_once_then_serves_from_cache() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        // Upstream sees the percent-encoded path.
        .and(path("/api/public/kanji/%E5%B1%B1"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "kanji.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_body()))
        .expect(1)
        .mount(&mock)
        .await;

    let state = test_app_state(test_config_with_upstream(&mock.uri()), seeded_db().await);
    let server = spawn_server(state).await;

    for _ in 0..2 {
        let resp = reqwest::get(server.url("/api/kanji/山")).await.expect("GET");
        assert_eq!(resp.status(), 200);
        let kanji: Value = resp.json().await.expect("json");
        assert_eq!(kanji["character"], "山");
        assert_eq!(kanji["meaning"], "mountain");
        assert_eq!(kanji["onyomi"], json!(["サン", "セン"]));
        assert_eq!(kanji["kunyomi"], json!(["やま"]));
        assert_eq!(kanji["strokeCount"], 3);
        assert_eq!(kanji["grade"], 1);
    }

    mock.verify().await;
}

#[tokio::test]
async fn seeded_kanji_never_calls_upstream() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock)
        .await;

    let state = test_app_state(test_config_with_upstream(&mock.uri()), seeded_db().await);
    let server = spawn_server(state).await;

    let resp = reqwest::get(server.url("/api/kanji/水")).await.expect("GET");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.expect("json")["meaning"], "water");
    mock.verify().await;
}

#[tokio::test]
async fn upstream_404_is_404_and_not_cached() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/kanji/%E9%BE%98"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock)
        .await;

    let state = test_app_state(test_config_with_upstream(&mock.uri()), seeded_db().await);
    let server = spawn_server(state).await;

    for _ in 0..2 {
        let resp = reqwest::get(server.url("/api/kanji/龘")).await.expect("GET");
        assert_eq!(resp.status(), 404);
    }
    mock.verify().await;
}

#[tokio::test]
async fn upstream_error_field_is_404() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "No kanji found."})))
        .mount(&mock)
        .await;

    let state = test_app_state(test_config_with_upstream(&mock.uri()), seeded_db().await);
    let server = spawn_server(state).await;

    let resp = reqwest::get(server.url("/api/kanji/亜")).await.expect("GET");

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn upstream_failure_is_500_without_details() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("quota exceeded"))
        .mount(&mock)
        .await;

    let state = test_app_state(test_config_with_upstream(&mock.uri()), seeded_db().await);
    let server = spawn_server(state).await;

    let resp = reqwest::get(server.url("/api/kanji/川")).await.expect("GET");

    assert_eq!(resp.status(), 500);
    assert_eq!(
        resp.json::<Value>().await.expect("json")["error"],
        "internal server error"
    );
}

#[tokio::test]
async fn multi_character_input_is_400() {
    let server = spawn_default().await;

    let resp = reqwest::get(server.url("/api/kanji/山川")).await.expect("GET");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn unconfigured_miss_is_404() {
    let server = spawn_default().await;

    let cached = reqwest::get(server.url("/api/kanji/食")).await.expect("GET");
    let missing = reqwest::get(server.url("/api/kanji/山")).await.expect("GET");

    assert_eq!(cached.status(), 200);
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn url_special_characters_are_rejected_before_upstream() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_body()))
        .expect(0)
        .mount(&mock)
        .await;

    let state = test_app_state(test_config_with_upstream(&mock.uri()), seeded_db().await);
    let server = spawn_server(state).await;

    for encoded in ["%3F", "%23", "%2F", "%E3%81%82"] {
        let resp = reqwest::get(server.url(&format!("/api/kanji/{encoded}")))
            .await
            .expect("GET");
        assert_eq!(resp.status(), 400, "{encoded}");
    }
    mock.verify().await;
}
