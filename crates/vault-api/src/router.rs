//! Route definitions for the SecureVault HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Router, middleware as axum_middleware};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let api_routes = Router::new()
        .merge(file_routes())
        .merge(share_routes())
        .merge(link_routes())
        .route("/health", get(handlers::health::health));

    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let max_body = server.max_upload_size_bytes;
    let cors = build_cors_layer(&server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// File listing, metadata, upload, download
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}/access", get(handlers::file::file_access))
        .route("/files/{id}/download", get(handlers::file::download_file))
}

/// Direct grants on a file
fn share_routes() -> Router<AppState> {
    Router::new().route(
        "/files/{id}/shares",
        post(handlers::share::create_share).get(handlers::share::list_shares),
    )
}

/// Link issue, listing, redemption
fn link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files/{id}/links",
            post(handlers::link::create_link).get(handlers::link::list_links),
        )
        .route("/links/{token}/redeem", post(handlers::link::redeem_link))
}
