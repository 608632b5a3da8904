//! Integration tests for bearer token authentication.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;

use vault_core::types::UserId;
use vault_entity::user::UserRole;

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/files", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
    assert_eq!(response.body["message"], "Missing Authorization header");
}

#[tokio::test]
async fn test_wrong_scheme_is_rejected() {
    let app = helpers::TestApp::new();
    let user = app.create_user("alice", UserRole::Standard).await;

    let req = axum::http::Request::builder()
        .uri("/api/files")
        .header("Authorization", format!("Token {}", user.token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_foreign_signature_is_rejected() {
    let app = helpers::TestApp::new();
    let token = helpers::mint_token_with_secret(
        UserId::new(),
        UserRole::Admin,
        "mallory",
        Duration::minutes(5),
        "some-other-secret",
    );

    let response = app.request("GET", "/api/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid token signature");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = helpers::TestApp::new();
    let token = helpers::mint_token(
        UserId::new(),
        UserRole::Standard,
        "late",
        Duration::minutes(-10),
    );

    let response = app.request("GET", "/api/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token has expired");
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"]["backend"], "memory");
    assert_eq!(response.data()["storage"]["available"], true);
}
