//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, ComponentHealth, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Answers `503` when either store is unreachable.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database = ComponentHealth {
        backend: state.store.backend().to_string(),
        available: state.store.health_check().await.unwrap_or(false),
    };
    let storage = ComponentHealth {
        backend: state.blobs.provider_type().to_string(),
        available: state.blobs.health_check().await.unwrap_or(false),
    };

    let healthy = database.available && storage.available;
    if !healthy {
        tracing::warn!(
            database = database.available,
            storage = storage.available,
            "Health check failed"
        );
    }

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::ok(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            storage,
        })),
    )
}
