//! Shareable link repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_entity::share::{NewShareGrant, NewShareLink, ShareLink};

use super::grant::{insert_or_fetch, mark_file_shared};
use super::write_error;
use crate::store::RedeemOutcome;

/// Repository for one-time shareable links.
#[derive(Debug, Clone)]
pub struct ShareLinkRepository {
    pool: PgPool,
}

impl ShareLinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a link. Returns `None` when the token is already taken.
    pub async fn insert(&self, data: &NewShareLink) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            r#"
            INSERT INTO share_links (file_id, token, permission, created_by, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (token) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(data.file_id)
        .bind(&data.token)
        .bind(data.permission)
        .bind(data.created_by)
        .bind(data.expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create share link"))
    }

    /// Links issued for a file, oldest first.
    pub async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE file_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share links", e))
    }

    /// Consume a link and turn it into a grant for `redeemer`.
    ///
    /// The conditional update both checks validity and claims the link, so
    /// concurrent redeemers serialize on the row lock and only the first one
    /// sees `consumed = FALSE`. Grant creation and the `is_shared` flag
    /// commit with it.
    pub async fn redeem(
        &self,
        token: &str,
        redeemer: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<RedeemOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let claimed = sqlx::query_as::<_, ShareLink>(
            r#"
            UPDATE share_links
            SET consumed = TRUE, consumed_by = $2, consumed_at = $3
            WHERE token = $1 AND consumed = FALSE AND expires_at > $3
            RETURNING *
            "#,
        )
        .bind(token)
        .bind(redeemer)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| write_error(e, "Failed to claim share link"))?;

        let Some(link) = claimed else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM share_links WHERE token = $1)")
                    .bind(token)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to look up share link", e)
                    })?;
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back", e)
            })?;
            return Ok(if exists {
                RedeemOutcome::Rejected
            } else {
                RedeemOutcome::Unknown
            });
        };

        let outcome = insert_or_fetch(
            &mut tx,
            &NewShareGrant {
                file_id: link.file_id,
                grantee_id: redeemer,
                permission: link.permission,
            },
        )
        .await?;
        mark_file_shared(&mut tx, link.file_id).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit link redemption", e)
        })?;

        Ok(RedeemOutcome::Redeemed {
            link,
            grant: outcome.grant,
        })
    }

    /// Delete links that were consumed or expired before `cutoff`.
    pub async fn purge_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        sqlx::query(
            r#"
            DELETE FROM share_links
            WHERE expires_at < $1 OR (consumed AND consumed_at < $1)
            "#,
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to purge share links", e))
    }
}
