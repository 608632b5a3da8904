//! Direct share grant handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use vault_core::error::AppError;
use vault_core::types::FileId;

use crate::dto::request::{CreateShareRequest, validate_request};
use crate::dto::response::{ApiResponse, ShareResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/{id}/shares
///
/// Answers `201 Created` for a new grant and `200 OK` with the existing
/// grant when the user already had one.
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateShareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShareResponse>>), AppError> {
    validate_request(&req)?;
    let grantee = req.grantee()?;
    let permission = req.permission()?;

    let outcome = state
        .share_registry
        .grant_access(&auth, FileId::from_uuid(id), grantee, permission)
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::ok(outcome.grant.into()))))
}

/// GET /api/files/{id}/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ShareResponse>>>, AppError> {
    let grants = state
        .share_registry
        .list_shares(&auth, FileId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(
        grants.into_iter().map(ShareResponse::from).collect(),
    )))
}
