//! Unit tests for `AppError` status mapping and client-facing messages.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use nihongo_api::AppError;

#[test]
fn client_errors_map_to_4xx() {
    assert_eq!(
        AppError::BadRequest("x".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Unauthorized("x".into()).status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
}

#[test]
fn server_errors_map_to_500() {
    for err in [
        AppError::Config("x".into()),
        AppError::Db("x".into()),
        AppError::Upstream("x".into()),
        AppError::Io("x".into()),
    ] {
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test]
fn server_error_details_are_hidden() {
    let err = AppError::Db("UNIQUE constraint failed: verbs.dictionary_form".into());
    assert_eq!(err.user_message(), "internal server error");
}

#[test]
fn client_error_message_is_passed_through() {
    let err = AppError::NotFound("verb not found: 食べる".into());
    assert_eq!(err.user_message(), "verb not found: 食べる");
}

#[test]
fn display_includes_category() {
    assert_eq!(
        AppError::BadRequest("level is required".into()).to_string(),
        "bad request: level is required"
    );
    assert_eq!(AppError::Upstream("timeout".into()).to_string(), "upstream: timeout");
}

#[test]
fn into_response_carries_status() {
    let response = AppError::Unauthorized("google account not connected".into()).into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn toml_error_converts_to_config() {
    let toml_err = toml::from_str::<toml::Value>("= broken").expect_err("invalid toml");
    let err: AppError = toml_err.into();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn io_error_converts_to_io() {
    let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, AppError::Io(ref msg) if msg.contains("gone")));
}

#[test]
fn json_error_converts_with_neutral_message() {
    let json_err =
        serde_json::from_str::<serde_json::Value>("{not json").expect_err("invalid json");
    let err: AppError = json_err.into();
    assert!(matches!(&err, AppError::Db(msg) if msg.starts_with("invalid json: ")));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
