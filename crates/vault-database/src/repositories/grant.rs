//! Share grant repository implementation.

use sqlx::{PgConnection, PgPool};
use tracing::debug;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_entity::share::{NewShareGrant, ShareGrant};

use super::write_error;
use crate::store::GrantOutcome;

/// Repository for direct share grants.
#[derive(Debug, Clone)]
pub struct ShareGrantRepository {
    pool: PgPool,
}

impl ShareGrantRepository {
    /// Create a new grant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the grant for a (file, grantee) pair.
    pub async fn find(&self, file_id: FileId, grantee_id: UserId) -> AppResult<Option<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>(
            "SELECT * FROM share_grants WHERE file_id = $1 AND grantee_id = $2",
        )
        .bind(file_id)
        .bind(grantee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share grant", e))
    }

    /// Grants on a file, oldest first.
    pub async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>(
            "SELECT * FROM share_grants WHERE file_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share grants", e))
    }

    /// Create the grant if the pair has none, otherwise return the existing one.
    ///
    /// A newly created grant flags the file as shared in the same transaction.
    pub async fn create_or_fetch(&self, data: &NewShareGrant) -> AppResult<GrantOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let outcome = insert_or_fetch(&mut tx, data).await?;
        if outcome.created {
            mark_file_shared(&mut tx, data.file_id).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit share grant", e)
        })?;
        Ok(outcome)
    }
}

/// Insert a grant, falling back to the row that won the unique index.
///
/// `ON CONFLICT DO NOTHING` waits for a concurrent inserter of the same pair
/// to commit, so the follow-up select always sees the winner.
pub(crate) async fn insert_or_fetch(
    conn: &mut PgConnection,
    data: &NewShareGrant,
) -> AppResult<GrantOutcome> {
    let inserted = sqlx::query_as::<_, ShareGrant>(
        r#"
        INSERT INTO share_grants (file_id, grantee_id, permission)
        VALUES ($1, $2, $3)
        ON CONFLICT (file_id, grantee_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(data.file_id)
    .bind(data.grantee_id)
    .bind(data.permission)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| write_error(e, "Failed to create share grant"))?;

    if let Some(grant) = inserted {
        return Ok(GrantOutcome {
            grant,
            created: true,
        });
    }

    debug!(
        file_id = %data.file_id,
        grantee_id = %data.grantee_id,
        "Share grant already exists, fetching"
    );
    let grant = sqlx::query_as::<_, ShareGrant>(
        "SELECT * FROM share_grants WHERE file_id = $1 AND grantee_id = $2",
    )
    .bind(data.file_id)
    .bind(data.grantee_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to fetch existing share grant", e)
    })?;

    Ok(GrantOutcome {
        grant,
        created: false,
    })
}

/// Set `is_shared` on a file.
pub(crate) async fn mark_file_shared(conn: &mut PgConnection, file_id: FileId) -> AppResult<()> {
    sqlx::query("UPDATE files SET is_shared = TRUE WHERE id = $1 AND is_shared = FALSE")
        .bind(file_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark file as shared", e)
        })?;
    Ok(())
}
