//! Encrypted file upload.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::{BlobStore, EncryptedBlob};
use vault_core::types::FileId;
use vault_database::VaultStore;
use vault_entity::file::{CreateFile, File};

use crate::context::RequestContext;

/// A client-encrypted file as received from the uploader.
///
/// `declared_size` and `content_type` describe the plaintext and are taken
/// on trust.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Display name.
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Declared plaintext size in bytes.
    pub declared_size: i64,
    /// Encrypted contents.
    pub ciphertext: Bytes,
    /// File key wrapped for the uploader.
    pub wrapped_key: Bytes,
}

impl UploadFile {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("file_name is required"));
        }
        if self.content_type.trim().is_empty() {
            return Err(AppError::validation("file_type is required"));
        }
        if self.declared_size < 0 {
            return Err(AppError::validation("file_size must not be negative"));
        }
        if self.ciphertext.is_empty() {
            return Err(AppError::validation("file is required"));
        }
        if self.wrapped_key.is_empty() {
            return Err(AppError::validation("encrypted_key is required"));
        }
        Ok(())
    }
}

/// Stores uploaded ciphertext and records the file.
#[derive(Debug, Clone)]
pub struct UploadService {
    store: Arc<dyn VaultStore>,
    blobs: Arc<dyn BlobStore>,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(store: Arc<dyn VaultStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Store an upload owned by the requester.
    ///
    /// The blob is written before the record; if the record cannot be
    /// created the blob is removed again.
    pub async fn upload(&self, ctx: &RequestContext, upload: UploadFile) -> AppResult<File> {
        if !ctx.role.can_upload() {
            return Err(AppError::forbidden("Your account cannot upload files"));
        }
        upload.validate()?;

        let file_id = FileId::new();
        let stored_bytes = upload.ciphertext.len();
        self.blobs
            .put(
                file_id,
                EncryptedBlob {
                    ciphertext: upload.ciphertext,
                    wrapped_key: upload.wrapped_key,
                },
            )
            .await?;

        let record = CreateFile {
            id: file_id,
            owner_id: ctx.user_id,
            name: upload.name.trim().to_string(),
            content_type: upload.content_type.trim().to_string(),
            size_bytes: upload.declared_size,
        };
        let file = match self.store.create_file(&record).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(file_id).await {
                    error!(file_id = %file_id, error = %cleanup, "Failed to remove orphaned blob");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            declared_size = file.size_bytes,
            stored_bytes,
            ip = ctx.ip_address.as_deref(),
            "File uploaded"
        );
        Ok(file)
    }
}
