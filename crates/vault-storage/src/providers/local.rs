//! Local filesystem blob store.
//!
//! Each file gets a directory `<root>/<first two hex chars>/<file id>/`
//! holding `ciphertext.bin` and `wrapped_key.bin`. Writes go to a temporary
//! name first and are renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::traits::{BlobStore, EncryptedBlob};
use vault_core::types::FileId;

const CIPHERTEXT: &str = "ciphertext.bin";
const WRAPPED_KEY: &str = "wrapped_key.bin";

/// Local filesystem blob store.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: impl AsRef<Path>) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    fn blob_dir(&self, file_id: FileId) -> PathBuf {
        let id = file_id.to_string();
        self.root.join(&id[..2]).join(id)
    }

    async fn write_atomic(path: &Path, data: &[u8]) -> AppResult<()> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move blob into place: {}", path.display()),
                e,
            )
        })
    }

    async fn read(path: &Path, file_id: FileId) -> AppResult<Bytes> {
        match fs::read(path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(format!("Blob for file {file_id} not found")))
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read blob: {}", path.display()),
                e,
            )),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, file_id: FileId, blob: EncryptedBlob) -> AppResult<()> {
        let dir = self.blob_dir(file_id);
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob directory: {}", dir.display()),
                e,
            )
        })?;

        Self::write_atomic(&dir.join(WRAPPED_KEY), &blob.wrapped_key).await?;
        Self::write_atomic(&dir.join(CIPHERTEXT), &blob.ciphertext).await?;

        debug!(
            file_id = %file_id,
            bytes = blob.ciphertext.len(),
            "Stored encrypted blob"
        );
        Ok(())
    }

    async fn get(&self, file_id: FileId) -> AppResult<EncryptedBlob> {
        let dir = self.blob_dir(file_id);
        let ciphertext = Self::read(&dir.join(CIPHERTEXT), file_id).await?;
        let wrapped_key = Self::read(&dir.join(WRAPPED_KEY), file_id).await?;
        Ok(EncryptedBlob {
            ciphertext,
            wrapped_key,
        })
    }

    async fn delete(&self, file_id: FileId) -> AppResult<()> {
        let dir = self.blob_dir(file_id);
        match fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {}", dir.display()),
                e,
            )),
        }
    }
}
