//! End-to-end sharing flow: upload, issue a link, redeem it as a guest.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use tokio::task::JoinSet;
use tower::ServiceExt;

use vault_entity::user::UserRole;

#[tokio::test]
async fn test_upload_link_redeem_flow() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let guest = app.create_user("guest", UserRole::Restricted).await;
    let bob = app.create_user("bob", UserRole::Standard).await;

    let upload = app
        .upload(&alice.token, "notes.txt", b"\x9a\x01sealed", b"key-for-alice")
        .await;
    assert_eq!(upload.status, StatusCode::CREATED, "{:?}", upload.body);
    let file_id = upload.data()["id"].as_str().unwrap().to_string();
    assert_eq!(upload.data()["is_shared"], false);

    let token = app
        .create_link(
            &alice,
            &file_id,
            json!({ "expiration_hours": 2, "permission": "download" }),
        )
        .await;
    assert_eq!(token.len(), 43);

    // Before redemption the guest sees nothing and cannot read the file.
    let listing = app
        .request("GET", "/api/files", None, Some(&guest.token))
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.data().as_array().unwrap().len(), 0);

    let denied = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&guest.token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let redeemed = app
        .request(
            "POST",
            &format!("/api/links/{token}/redeem"),
            None,
            Some(&guest.token),
        )
        .await;
    assert_eq!(redeemed.status, StatusCode::OK, "{:?}", redeemed.body);
    assert_eq!(redeemed.data()["file_id"], file_id.as_str());
    assert_eq!(redeemed.data()["shared_with"], guest.id.to_string());
    assert_eq!(redeemed.data()["permission"], "download");

    let listing = app
        .request("GET", "/api/files", None, Some(&guest.token))
        .await;
    let files = listing.data().as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["id"], file_id.as_str());
    assert_eq!(files[0]["is_shared"], true);

    let download = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&guest.token),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(&download.bytes[..], b"\x9a\x01sealed");
    assert_eq!(
        download.headers["encrypted-key"].to_str().unwrap(),
        STANDARD.encode(b"key-for-alice")
    );

    // The link is spent, whoever tries it next.
    let second = app
        .request(
            "POST",
            &format!("/api/links/{token}/redeem"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(second.status, StatusCode::FORBIDDEN);
    assert_eq!(second.body["error"], "FORBIDDEN");
    assert_eq!(second.body["message"], "Invalid or expired link");

    let bob_listing = app
        .request("GET", "/api/files", None, Some(&bob.token))
        .await;
    assert_eq!(bob_listing.data().as_array().unwrap().len(), 0);

    let links = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/links"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(links.status, StatusCode::OK);
    let links = links.data().as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["consumed"], true);
    assert_eq!(links[0]["consumed_by"], guest.id.to_string());
}

#[tokio::test]
async fn test_unknown_and_malformed_tokens() {
    let app = helpers::TestApp::new();
    let bob = app.create_user("bob", UserRole::Standard).await;

    let unknown = app
        .request(
            "POST",
            "/api/links/AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA/redeem",
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("POST", "/api/links/not*a*token/redeem", None, Some(&bob.token))
        .await;
    assert_eq!(malformed.status, StatusCode::FORBIDDEN);
    assert_eq!(malformed.body["message"], "Invalid or expired link");
}

#[tokio::test]
async fn test_concurrent_redemption_has_one_winner() {
    let app = helpers::TestApp::new();
    let alice = app.create_user("alice", UserRole::Standard).await;
    let file_id = app.upload_ok(&alice, "race.txt").await;
    let token = app.create_link(&alice, &file_id, json!({})).await;

    let mut redeemers = Vec::new();
    for i in 0..8 {
        redeemers.push(
            app.create_user(&format!("racer{i}"), UserRole::Standard)
                .await,
        );
    }

    let mut tasks = JoinSet::new();
    for user in &redeemers {
        let router = app.router.clone();
        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/links/{token}/redeem"))
            .header("Authorization", format!("Bearer {}", user.token))
            .body(Body::empty())
            .unwrap();
        tasks.spawn(async move { router.oneshot(req).await.unwrap().status() });
    }

    let mut statuses = Vec::new();
    while let Some(status) = tasks.join_next().await {
        statuses.push(status.unwrap());
    }

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::FORBIDDEN)
            .count(),
        7
    );

    let shares = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/shares"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(shares.data().as_array().unwrap().len(), 1);
}
