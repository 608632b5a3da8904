//! Blob store trait for encrypted file contents.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::FileId;

/// Ciphertext and the wrapped key that decrypts it.
///
/// Both halves are opaque: they are produced and consumed by clients and
/// never inspected by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    /// Client-encrypted file contents.
    pub ciphertext: Bytes,
    /// File key wrapped for the owner.
    pub wrapped_key: Bytes,
}

/// Storage for [`EncryptedBlob`]s keyed by file id.
///
/// Implemented in `vault-storage` by a local filesystem store and an
/// in-memory store.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable and writable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store the blob for a file, replacing any previous contents.
    async fn put(&self, file_id: FileId, blob: EncryptedBlob) -> AppResult<()>;

    /// Load the blob for a file. Fails with `NotFound` when absent.
    async fn get(&self, file_id: FileId) -> AppResult<EncryptedBlob>;

    /// Remove the blob for a file. Removing a missing blob is not an error.
    async fn delete(&self, file_id: FileId) -> AppResult<()>;
}
