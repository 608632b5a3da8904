//! SecureVault Server: encrypted file storage with access control and sharing.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use vault_api::{AppState, build_router};
use vault_core::config::{AppConfig, DatabaseBackend};
use vault_database::{DatabasePool, MemoryVaultStore, PgVaultStore, VaultStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("VAULT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Build the configured record store, migrating PostgreSQL first.
async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn VaultStore>> {
    match config.database.backend {
        DatabaseBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database)
                .await
                .context("Database connection failed")?;

            tracing::info!("Running database migrations...");
            pool.migrate().await.context("Migration failed")?;
            Ok(Arc::new(PgVaultStore::new(pool.into_pool())))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory record store; data is lost on exit");
            Ok(Arc::new(MemoryVaultStore::new()))
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting SecureVault v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;
    let blobs = vault_storage::build_blob_store(&config.storage)
        .await
        .context("Blob storage initialization failed")?;
    tracing::info!(
        database = store.backend(),
        storage = blobs.provider_type(),
        "Stores initialized"
    );

    let bind_address = config.server.bind_address();
    let state = AppState::new(config, store, blobs);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!(address = %bind_address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
