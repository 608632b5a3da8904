//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use vault_auth::{AccessEvaluator, JwtDecoder};
use vault_core::config::AppConfig;
use vault_core::traits::BlobStore;
use vault_database::VaultStore;
use vault_service::{
    DownloadService, FileCatalog, LinkIssuer, ShareRegistry, UploadService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Metadata store (PostgreSQL or in-memory)
    pub store: Arc<dyn VaultStore>,
    /// Ciphertext store
    pub blobs: Arc<dyn BlobStore>,
    /// Bearer token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Effective permission evaluator
    pub evaluator: Arc<AccessEvaluator>,
    pub file_catalog: Arc<FileCatalog>,
    pub upload_service: Arc<UploadService>,
    pub download_service: Arc<DownloadService>,
    pub share_registry: Arc<ShareRegistry>,
    pub link_issuer: Arc<LinkIssuer>,
}

impl AppState {
    /// Wire the services over the given stores.
    pub fn new(config: AppConfig, store: Arc<dyn VaultStore>, blobs: Arc<dyn BlobStore>) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let evaluator = Arc::new(AccessEvaluator::new(Arc::clone(&store)));

        let file_catalog = Arc::new(FileCatalog::new(Arc::clone(&store), Arc::clone(&evaluator)));
        let upload_service = Arc::new(UploadService::new(Arc::clone(&store), Arc::clone(&blobs)));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&store),
            Arc::clone(&blobs),
            Arc::clone(&evaluator),
        ));
        let share_registry = Arc::new(ShareRegistry::new(Arc::clone(&store)));
        let link_issuer = Arc::new(LinkIssuer::new(Arc::clone(&store), config.sharing.clone()));

        Self {
            config: Arc::new(config),
            store,
            blobs,
            jwt_decoder,
            evaluator,
            file_catalog,
            upload_service,
            download_service,
            share_registry,
            link_issuer,
        }
    }
}
