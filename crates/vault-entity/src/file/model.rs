//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vault_core::types::{FileId, UserId};

/// An encrypted file stored in the vault.
///
/// Contents and the wrapped key live in the blob store under the same id;
/// this record only carries what the client declared at upload time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The user who uploaded the file.
    pub owner_id: UserId,
    /// Display name (including extension).
    pub name: String,
    /// Declared MIME type of the plaintext.
    pub content_type: String,
    /// Declared size in bytes.
    pub size_bytes: i64,
    /// Set once a grant has been created or a link consumed for this file.
    pub is_shared: bool,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Whether `user_id` uploaded this file.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Id chosen before the blob is written.
    pub id: FileId,
    /// The uploader.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Declared size in bytes.
    pub size_bytes: i64,
}
