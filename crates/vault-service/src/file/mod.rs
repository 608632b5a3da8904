//! File catalog, upload, and download.

pub mod catalog;
pub mod download;
pub mod upload;

pub use catalog::FileCatalog;
pub use download::{DownloadService, DownloadedFile};
pub use upload::{UploadFile, UploadService};

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::FileId;
use vault_database::VaultStore;
use vault_entity::file::File;

/// Load a file or fail with `NotFound`.
pub(crate) async fn require_file(store: &dyn VaultStore, file_id: FileId) -> AppResult<File> {
    store
        .find_file(file_id)
        .await?
        .ok_or_else(|| AppError::not_found("File not found"))
}
