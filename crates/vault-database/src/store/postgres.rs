//! PostgreSQL-backed [`VaultStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_entity::file::{CreateFile, File};
use vault_entity::share::{NewShareGrant, NewShareLink, ShareGrant, ShareLink};
use vault_entity::user::{CreateUser, User};

use super::{GrantOutcome, RedeemOutcome, VaultStore, VisibilityScope};
use crate::repositories::{
    FileRepository, ShareGrantRepository, ShareLinkRepository, UserRepository,
};

/// Store composed of the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct PgVaultStore {
    pool: PgPool,
    users: UserRepository,
    files: FileRepository,
    grants: ShareGrantRepository,
    links: ShareLinkRepository,
}

impl PgVaultStore {
    /// Build the store over a connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            files: FileRepository::new(pool.clone()),
            grants: ShareGrantRepository::new(pool.clone()),
            links: ShareLinkRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl VaultStore for PgVaultStore {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn upsert_user(&self, data: &CreateUser) -> AppResult<User> {
        self.users.upsert(data).await
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    async fn create_file(&self, data: &CreateFile) -> AppResult<File> {
        self.files.create(data).await
    }

    async fn find_file(&self, id: FileId) -> AppResult<Option<File>> {
        self.files.find_by_id(id).await
    }

    async fn list_files(&self, scope: VisibilityScope) -> AppResult<Vec<File>> {
        match scope {
            VisibilityScope::All => self.files.find_all().await,
            VisibilityScope::OwnedOrShared(user_id) => {
                self.files.find_owned_or_shared(user_id).await
            }
            VisibilityScope::SharedWith(user_id) => self.files.find_shared_with(user_id).await,
        }
    }

    async fn find_grant(
        &self,
        file_id: FileId,
        grantee_id: UserId,
    ) -> AppResult<Option<ShareGrant>> {
        self.grants.find(file_id, grantee_id).await
    }

    async fn create_or_fetch_grant(&self, data: &NewShareGrant) -> AppResult<GrantOutcome> {
        self.grants.create_or_fetch(data).await
    }

    async fn list_grants(&self, file_id: FileId) -> AppResult<Vec<ShareGrant>> {
        self.grants.find_by_file(file_id).await
    }

    async fn insert_link(&self, data: &NewShareLink) -> AppResult<Option<ShareLink>> {
        self.links.insert(data).await
    }

    async fn list_links(&self, file_id: FileId) -> AppResult<Vec<ShareLink>> {
        self.links.find_by_file(file_id).await
    }

    async fn redeem_link(
        &self,
        token: &str,
        redeemer: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<RedeemOutcome> {
        self.links.redeem(token, redeemer, now).await
    }

    async fn purge_links(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        self.links.purge_before(cutoff).await
    }
}
