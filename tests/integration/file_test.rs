//! Integration tests for upload, listing, metadata, and download.

mod helpers;

use axum::http::StatusCode;

use vault_entity::user::UserRole;

#[tokio::test]
async fn test_upload_requires_encrypted_key() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;

    let body = helpers::multipart_body(&[("file_name", "plain.txt")], Some(b"bytes"));
    let response = app.send_multipart(&alice.token, body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_non_base64_key() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;

    let body = helpers::multipart_body(
        &[("encrypted_key", "%%% not base64 %%%"), ("file_name", "a.txt")],
        Some(b"bytes"),
    );
    let response = app.send_multipart(&alice.token, body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_restricted_user_cannot_upload() {
    let app = helpers::TestApp::new();
    let guest = app.create_user("guest", UserRole::Restricted).await;

    let response = app.upload(&guest.token, "x.txt", b"data", b"key").await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_upload_records_declared_metadata() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;

    let response = app
        .upload(&alice.token, "report.txt", b"0123456789", b"key")
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert_eq!(data["name"], "report.txt");
    assert_eq!(data["content_type"], "text/plain");
    assert_eq!(data["size_bytes"], 10);
    assert_eq!(data["owner_id"], alice.id.to_string());
    assert_eq!(app.blobs.len(), 1);
}

#[tokio::test]
async fn test_listing_follows_role() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let bob = app.create_user("bob", UserRole::Standard).await;
    let admin = app.create_user("root", UserRole::Admin).await;

    let first = app.upload_ok(&alice, "first.txt").await;
    let second = app.upload_ok(&alice, "second.txt").await;
    let bobs = app.upload_ok(&bob, "bob.txt").await;

    let alice_list = app
        .request("GET", "/api/files", None, Some(&alice.token))
        .await;
    let ids: Vec<&str> = alice_list
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);

    let admin_list = app
        .request("GET", "/api/files", None, Some(&admin.token))
        .await;
    let admin_ids: Vec<&str> = admin_list
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(admin_ids.len(), 3);
    assert!(admin_ids.contains(&bobs.as_str()));
}

#[tokio::test]
async fn test_access_reports_source() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let bob = app.create_user("bob", UserRole::Standard).await;
    let admin = app.create_user("root", UserRole::Admin).await;
    let file_id = app.upload_ok(&alice, "a.txt").await;
    let path = format!("/api/files/{file_id}/access");

    let owner = app.request("GET", &path, None, Some(&alice.token)).await;
    assert_eq!(owner.status, StatusCode::OK);
    assert_eq!(owner.data()["source"], "owner");
    assert_eq!(owner.data()["permission"], "download");
    assert_eq!(owner.data()["can_download"], true);

    let stranger = app.request("GET", &path, None, Some(&bob.token)).await;
    assert_eq!(stranger.status, StatusCode::OK);
    assert_eq!(stranger.data()["source"], "denied");
    assert!(stranger.data()["permission"].is_null());
    assert_eq!(stranger.data()["can_view"], false);

    let root = app.request("GET", &path, None, Some(&admin.token)).await;
    assert_eq!(root.data()["source"], "admin_bypass");
}

#[tokio::test]
async fn test_download_sets_headers() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;

    let upload = app
        .upload(&alice.token, "quarterly report.pdf", b"sealed-bytes", b"wrapped")
        .await;
    let file_id = upload.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers["content-type"].to_str().unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        response.headers["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"quarterly report.pdf\""
    );
    assert_eq!(response.headers["x-file-type"].to_str().unwrap(), "text/plain");
    assert_eq!(response.headers["encrypted-key"].to_str().unwrap(), "d3JhcHBlZA==");
    assert_eq!(&response.bytes[..], b"sealed-bytes");
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;

    let response = app
        .request(
            "GET",
            "/api/files/00000000-0000-4000-8000-000000000000",
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let bad_id = app
        .request("GET", "/api/files/not-a-uuid", None, Some(&alice.token))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}
