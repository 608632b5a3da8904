//! # vault-storage
//!
//! Blob store adapters for SecureVault. Each adapter implements
//! [`vault_core::traits::BlobStore`] and treats ciphertext and wrapped keys
//! as opaque bytes.

pub mod providers;

use std::sync::Arc;

use tracing::info;

use vault_core::config::{BlobProvider, StorageConfig};
use vault_core::result::AppResult;
use vault_core::traits::BlobStore;

pub use providers::local::LocalBlobStore;
pub use providers::memory::MemoryBlobStore;

/// Build the blob store selected by configuration.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.provider {
        BlobProvider::Local => Arc::new(LocalBlobStore::new(&config.root_path).await?),
        BlobProvider::Memory => Arc::new(MemoryBlobStore::new()),
    };
    info!(provider = store.provider_type(), "Blob store ready");
    Ok(store)
}
