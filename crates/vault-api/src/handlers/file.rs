//! File listing, metadata, upload, and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use uuid::Uuid;

use vault_core::error::AppError;
use vault_core::types::FileId;
use vault_service::UploadFile;

use crate::dto::response::{AccessResponse, ApiResponse, FileResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Response header carrying the base64 wrapped file key.
pub const ENCRYPTED_KEY_HEADER: &str = "encrypted-key";

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, AppError> {
    let files = state.file_catalog.list_visible(&auth).await?;
    Ok(Json(ApiResponse::ok(
        files.into_iter().map(FileResponse::from).collect(),
    )))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileResponse>>, AppError> {
    let file = state.file_catalog.get(&auth, FileId::from_uuid(id)).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// GET /api/files/{id}/access
pub async fn file_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccessResponse>>, AppError> {
    let file_id = FileId::from_uuid(id);
    let decision = state.file_catalog.access(&auth, file_id).await?;
    Ok(Json(ApiResponse::ok(AccessResponse::new(file_id, decision))))
}

/// GET /api/files/{id}/download
///
/// The body is the stored ciphertext; the wrapped key travels in the
/// `Encrypted-Key` header so the client can decrypt locally.
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let result = state
        .download_service
        .download(&auth, FileId::from_uuid(id))
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                header_safe_filename(&result.file.name)
            ),
        )
        .header(header::CONTENT_LENGTH, result.blob.ciphertext.len())
        .header(ENCRYPTED_KEY_HEADER, STANDARD.encode(&result.blob.wrapped_key))
        .header("x-file-type", header_safe_filename(&result.file.content_type))
        .body(Body::from(result.blob.ciphertext))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// POST /api/files/upload
///
/// Multipart fields: `file` (ciphertext), `encrypted_key` (base64 wrapped
/// key), `file_name`, `file_type`, and `file_size` (plaintext bytes).
/// `file_name` and `file_type` fall back to the `file` part's metadata.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileResponse>>), AppError> {
    let mut ciphertext: Option<Bytes> = None;
    let mut part_name: Option<String> = None;
    let mut part_type: Option<String> = None;
    let mut encrypted_key: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut file_type: Option<String> = None;
    let mut file_size: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                part_name = field.file_name().map(String::from);
                part_type = field.content_type().map(String::from);
                ciphertext = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "encrypted_key" | "file_name" | "file_type" | "file_size" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                let slot = match name.as_str() {
                    "encrypted_key" => &mut encrypted_key,
                    "file_name" => &mut file_name,
                    "file_type" => &mut file_type,
                    _ => &mut file_size,
                };
                *slot = Some(text);
            }
            _ => {}
        }
    }

    let ciphertext = ciphertext.ok_or_else(|| AppError::validation("file is required"))?;
    let encrypted_key =
        encrypted_key.ok_or_else(|| AppError::validation("encrypted_key is required"))?;
    let wrapped_key = STANDARD
        .decode(encrypted_key.trim())
        .map_err(|_| AppError::validation("encrypted_key must be base64"))?;

    let declared_size = match file_size {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::validation("file_size must be an integer"))?,
        None => i64::try_from(ciphertext.len())
            .map_err(|_| AppError::validation("file is too large"))?,
    };

    let upload = UploadFile {
        name: file_name.or(part_name).unwrap_or_default(),
        content_type: file_type
            .or(part_type)
            .unwrap_or_else(|| "application/octet-stream".to_string()),
        declared_size,
        ciphertext,
        wrapped_key: Bytes::from(wrapped_key),
    };

    let file = state.upload_service.upload(&auth, upload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file.into()))))
}

/// Replace characters that cannot appear inside a quoted header value.
fn header_safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
