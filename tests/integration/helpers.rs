//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router over the in-memory record and blob
//! stores, so tests need no external services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use vault_api::AppState;
use vault_auth::Claims;
use vault_core::config::{AppConfig, BlobProvider, DatabaseBackend};
use vault_core::types::UserId;
use vault_database::{MemoryVaultStore, VaultStore};
use vault_entity::user::{CreateUser, UserRole};
use vault_storage::MemoryBlobStore;

pub const TEST_SECRET: &str = "integration-test-secret";
const MULTIPART_BOUNDARY: &str = "vault-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Record store behind the router
    pub store: MemoryVaultStore,
    /// Blob store behind the router
    pub blobs: MemoryBlobStore,
    /// Application config
    pub config: AppConfig,
}

/// A user known to the directory, with a valid access token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub username: String,
    pub token: String,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body, or `Null` when the body is not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.database.backend = DatabaseBackend::Memory;
        config.storage.provider = BlobProvider::Memory;

        let store = MemoryVaultStore::new();
        let blobs = MemoryBlobStore::new();
        let state = AppState::new(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(blobs.clone()),
        );

        Self {
            router: vault_api::build_router(state),
            store,
            blobs,
            config,
        }
    }

    /// Register a user directly in the store and mint a token for them.
    pub async fn create_user(&self, username: &str, role: UserRole) -> TestUser {
        let user = self
            .store
            .upsert_user(&CreateUser {
                id: UserId::new(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                role,
            })
            .await
            .expect("Failed to create test user");

        TestUser {
            id: user.id,
            username: user.username.clone(),
            token: mint_token(user.id, role, username, Duration::minutes(15)),
        }
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload ciphertext with a wrapped key; returns the raw response.
    pub async fn upload(
        &self,
        token: &str,
        file_name: &str,
        ciphertext: &[u8],
        wrapped_key: &[u8],
    ) -> TestResponse {
        let encoded_key = STANDARD.encode(wrapped_key);
        let size = ciphertext.len().to_string();
        let body = multipart_body(
            &[
                ("encrypted_key", encoded_key.as_str()),
                ("file_name", file_name),
                ("file_type", "text/plain"),
                ("file_size", size.as_str()),
            ],
            Some(ciphertext),
        );
        self.send_multipart(token, body).await
    }

    /// Upload and return the new file's id.
    pub async fn upload_ok(&self, user: &TestUser, file_name: &str) -> String {
        let response = self
            .upload(&user.token, file_name, b"\x01\x02ciphertext", b"wrapped-key")
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {:?}",
            response.body
        );
        response.data()["id"]
            .as_str()
            .expect("No id in upload response")
            .to_string()
    }

    /// Post a prebuilt multipart body to the upload endpoint.
    pub async fn send_multipart(&self, token: &str, body: Vec<u8>) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Issue a link on a file and return its token.
    pub async fn create_link(&self, owner: &TestUser, file_id: &str, body: Value) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/files/{file_id}/links"),
                Some(body),
                Some(&owner.token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Link creation failed: {:?}",
            response.body
        );
        response.data()["token"]
            .as_str()
            .expect("No token in link response")
            .to_string()
    }

    /// Send a prepared request through the router.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Sign a token the way the identity service does.
pub fn mint_token(user_id: UserId, role: UserRole, username: &str, ttl: Duration) -> String {
    mint_token_with_secret(user_id, role, username, ttl, TEST_SECRET)
}

pub fn mint_token_with_secret(
    user_id: UserId,
    role: UserRole,
    username: &str,
    ttl: Duration,
    secret: &str,
) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        username: username.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// Build a `multipart/form-data` body with text fields and an optional file.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"upload.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}
