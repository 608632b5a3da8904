//! In-memory blob store.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::{BlobStore, EncryptedBlob};
use vault_core::types::FileId;

/// Blob store kept in a concurrent map. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<DashMap<FileId, EncryptedBlob>>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, file_id: FileId, blob: EncryptedBlob) -> AppResult<()> {
        self.blobs.insert(file_id, blob);
        Ok(())
    }

    async fn get(&self, file_id: FileId) -> AppResult<EncryptedBlob> {
        self.blobs
            .get(&file_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Blob for file {file_id} not found")))
    }

    async fn delete(&self, file_id: FileId) -> AppResult<()> {
        self.blobs.remove(&file_id);
        Ok(())
    }
}
