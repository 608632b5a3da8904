//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use vault_core::error::{AppError, ErrorKind};

/// Run all pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(count = migrator.iter().count(), "Applying database migrations");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to run migrations", e)
    })?;

    info!("Database schema is up to date");
    Ok(())
}
