//! Encrypted file download.

use std::sync::Arc;

use tracing::info;

use vault_auth::AccessEvaluator;
use vault_core::result::AppResult;
use vault_core::traits::{BlobStore, EncryptedBlob};
use vault_core::types::FileId;
use vault_database::VaultStore;
use vault_entity::file::File;
use vault_entity::permission::PermissionLevel;

use super::require_file;
use crate::context::RequestContext;

/// A file record together with its stored ciphertext and wrapped key.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// The file record.
    pub file: File,
    /// Ciphertext and wrapped key.
    pub blob: EncryptedBlob,
}

/// Serves ciphertext to requesters holding `download` access.
#[derive(Debug, Clone)]
pub struct DownloadService {
    store: Arc<dyn VaultStore>,
    blobs: Arc<dyn BlobStore>,
    evaluator: Arc<AccessEvaluator>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        store: Arc<dyn VaultStore>,
        blobs: Arc<dyn BlobStore>,
        evaluator: Arc<AccessEvaluator>,
    ) -> Self {
        Self {
            store,
            blobs,
            evaluator,
        }
    }

    /// Fetch a file's ciphertext and wrapped key.
    pub async fn download(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<DownloadedFile> {
        let file = require_file(self.store.as_ref(), file_id).await?;
        let decision = self
            .evaluator
            .authorize(&file, &ctx.principal(), PermissionLevel::Download)
            .await?;
        let blob = self.blobs.get(file.id).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            source = ?decision.source,
            bytes = blob.ciphertext.len(),
            ip = ctx.ip_address.as_deref(),
            "File downloaded"
        );
        Ok(DownloadedFile { file, blob })
    }
}
