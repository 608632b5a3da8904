//! Integration tests for direct shares and link issuance.

mod helpers;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use vault_entity::user::UserRole;

#[tokio::test]
async fn test_share_is_idempotent() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let bob = app.create_user("bob", UserRole::Standard).await;
    let file_id = app.upload_ok(&alice, "doc.txt").await;
    let path = format!("/api/files/{file_id}/shares");

    let first = app
        .request(
            "POST",
            &path,
            Some(json!({ "shared_with_email": "BOB@example.com", "permission": "view" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED, "{:?}", first.body);
    assert_eq!(first.data()["shared_with"], bob.id.to_string());

    let repeat = app
        .request(
            "POST",
            &path,
            Some(json!({ "shared_with_id": bob.id.to_string(), "permission": "download" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(repeat.status, StatusCode::OK);
    assert_eq!(repeat.data()["id"], first.data()["id"]);
    assert_eq!(repeat.data()["permission"], "view");

    let list = app.request("GET", &path, None, Some(&alice.token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_view_grant_does_not_allow_download() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let bob = app.create_user("bob", UserRole::Standard).await;
    let file_id = app.upload_ok(&alice, "doc.txt").await;

    let share = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/shares"),
            Some(json!({ "shared_with_email": "bob@example.com" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(share.status, StatusCode::CREATED);
    assert_eq!(share.data()["permission"], "view");

    let listing = app
        .request("GET", "/api/files", None, Some(&bob.token))
        .await;
    assert_eq!(listing.data().as_array().unwrap().len(), 1);

    let meta = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&bob.token))
        .await;
    assert_eq!(meta.status, StatusCode::OK);
    assert_eq!(meta.data()["is_shared"], true);

    let download = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(download.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_owner_can_share() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let bob = app.create_user("bob", UserRole::Standard).await;
    app.create_user("carol", UserRole::Standard).await;
    let file_id = app.upload_ok(&alice, "doc.txt").await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/shares"),
            Some(json!({ "shared_with_email": "carol@example.com" })),
            Some(&bob.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let links = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/links"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(links.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_share_request_errors() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let file_id = app.upload_ok(&alice, "doc.txt").await;
    let path = format!("/api/files/{file_id}/shares");

    let unknown = app
        .request(
            "POST",
            &path,
            Some(json!({ "shared_with_email": "nobody@example.com" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["message"], "User not found");

    let bad_permission = app
        .request(
            "POST",
            &path,
            Some(json!({ "shared_with_email": "alice@example.com", "permission": "edit" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(bad_permission.status, StatusCode::BAD_REQUEST);

    let no_grantee = app
        .request("POST", &path, Some(json!({})), Some(&alice.token))
        .await;
    assert_eq!(no_grantee.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_link_defaults_and_bounds() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let file_id = app.upload_ok(&alice, "doc.txt").await;
    let path = format!("/api/files/{file_id}/links");

    let created = app.request("POST", &path, None, Some(&alice.token)).await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.data()["permission"], "view");
    assert_eq!(created.data()["consumed"], false);
    let expires_at: DateTime<Utc> = created.data()["expires_at"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let horizon = expires_at - Utc::now();
    assert!(horizon > Duration::hours(23) && horizon <= Duration::hours(24));

    for hours in [0, -3, 721] {
        let response = app
            .request(
                "POST",
                &path,
                Some(json!({ "expiration_hours": hours })),
                Some(&alice.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "hours = {hours}");
    }

    // Creating links never marks the file shared.
    let meta = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(meta.data()["is_shared"], false);
}
