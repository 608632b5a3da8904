//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Which blob store backs encrypted file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobProvider {
    /// Files on the local filesystem under `root_path`.
    Local,
    /// Process memory; contents are lost on restart.
    Memory,
}

/// Blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use.
    #[serde(default = "default_provider")]
    pub provider: BlobProvider,
    /// Root path for local blob storage.
    #[serde(default = "default_root_path")]
    pub root_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root_path: default_root_path(),
        }
    }
}

fn default_provider() -> BlobProvider {
    BlobProvider::Local
}

fn default_root_path() -> String {
    "./data/blobs".to_string()
}
