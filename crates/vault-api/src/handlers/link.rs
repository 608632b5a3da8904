//! Share link issue, listing, and redemption handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use vault_core::error::AppError;
use vault_core::types::FileId;

use crate::dto::request::{CreateLinkRequest, validate_request};
use crate::dto::response::{ApiResponse, LinkResponse, ShareResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/{id}/links
///
/// The body may be empty, in which case defaults apply.
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<LinkResponse>>), AppError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        CreateLinkRequest::default()
    } else {
        serde_json::from_slice::<CreateLinkRequest>(&body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?
    };
    validate_request(&req)?;
    let permission = req.permission()?;

    let link = state
        .link_issuer
        .create_link(&auth, FileId::from_uuid(id), req.expiration_hours, permission)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(link.into()))))
}

/// GET /api/files/{id}/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<LinkResponse>>>, AppError> {
    let links = state
        .link_issuer
        .list_links(&auth, FileId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(
        links.into_iter().map(LinkResponse::from).collect(),
    )))
}

/// POST /api/links/{token}/redeem
///
/// Returns the grant the redeemer now holds on the linked file.
pub async fn redeem_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<ShareResponse>>, AppError> {
    let grant = state.link_issuer.redeem(&auth, &token).await?;
    Ok(Json(ApiResponse::ok(grant.into())))
}
