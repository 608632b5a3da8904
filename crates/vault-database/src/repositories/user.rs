//! User directory repository implementation.

use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::UserId;
use vault_entity::user::{CreateUser, User};

/// Repository for the mirrored user directory.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// List all users ordered by username.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Insert a user, or refresh the mirrored fields if the id is known.
    pub async fn upsert(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET username = EXCLUDED.username,
                    email = EXCLUDED.email,
                    role = EXCLUDED.role
            RETURNING *
            "#,
        )
        .bind(data.id)
        .bind(&data.username)
        .bind(data.email.trim())
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::with_source(
                ErrorKind::Conflict,
                "A user with that username or email already exists",
                e,
            ),
            _ => AppError::with_source(ErrorKind::Database, "Failed to save user", e),
        })
    }
}
