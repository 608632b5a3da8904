//! File repository implementation.

use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_entity::file::{CreateFile, File};

use super::write_error;

/// Repository for file records and the visibility queries.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Create a new file record.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            r#"
            INSERT INTO files (id, owner_id, name, content_type, size_bytes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.id)
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.content_type)
        .bind(data.size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create file"))
    }

    /// Every file, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Files owned by the user plus shared files granted to the user, newest first.
    pub async fn find_owned_or_shared(&self, user_id: UserId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            r#"
            SELECT f.* FROM files f
            WHERE f.owner_id = $1
               OR (f.is_shared AND EXISTS (
                    SELECT 1 FROM share_grants g
                    WHERE g.file_id = f.id AND g.grantee_id = $1))
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list visible files", e))
    }

    /// Shared files granted to the user, newest first.
    pub async fn find_shared_with(&self, user_id: UserId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            r#"
            SELECT f.* FROM files f
            WHERE f.is_shared AND EXISTS (
                SELECT 1 FROM share_grants g
                WHERE g.file_id = f.id AND g.grantee_id = $1)
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shared files", e))
    }
}
