//! The record store seam used by the sharing core.
//!
//! [`VaultStore`] is implemented by [`PgVaultStore`] for production and by
//! [`MemoryVaultStore`] for development and tests. Both guarantee that grant
//! creation is idempotent per (file, grantee) and that link redemption is
//! a single atomic unit.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_entity::file::{CreateFile, File};
use vault_entity::share::{NewShareGrant, NewShareLink, ShareGrant, ShareLink};
use vault_entity::user::{CreateUser, User};

pub use memory::MemoryVaultStore;
pub use postgres::PgVaultStore;

/// Which files a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Every file.
    All,
    /// Files the user owns, plus shared files granted to the user.
    OwnedOrShared(UserId),
    /// Only shared files granted to the user.
    SharedWith(UserId),
}

/// Result of an idempotent grant creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantOutcome {
    /// The grant now stored for the pair.
    pub grant: ShareGrant,
    /// `true` if this call created it, `false` if it already existed.
    pub created: bool,
}

/// Result of a redemption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// The link was claimed by this call.
    Redeemed {
        /// The link as it was consumed.
        link: ShareLink,
        /// The grant held by the redeemer afterwards.
        grant: ShareGrant,
    },
    /// The link exists but is consumed or expired.
    Rejected,
    /// No link has this token.
    Unknown,
}

/// Durable state for users, files, grants, and links.
#[async_trait]
pub trait VaultStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., "postgres", "memory").
    fn backend(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert a user or refresh a known one.
    async fn upsert_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by id.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All users ordered by username.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Insert a file record.
    async fn create_file(&self, data: &CreateFile) -> AppResult<File>;

    /// Find a file by id.
    async fn find_file(&self, id: FileId) -> AppResult<Option<File>>;

    /// Files in `scope`, deduplicated, newest upload first.
    async fn list_files(&self, scope: VisibilityScope) -> AppResult<Vec<File>>;

    /// Find the grant for a (file, grantee) pair.
    async fn find_grant(&self, file_id: FileId, grantee_id: UserId)
    -> AppResult<Option<ShareGrant>>;

    /// Create a grant unless the pair already has one.
    ///
    /// Creation sets `is_shared` on the file atomically with the insert.
    async fn create_or_fetch_grant(&self, data: &NewShareGrant) -> AppResult<GrantOutcome>;

    /// Grants on a file, oldest first.
    async fn list_grants(&self, file_id: FileId) -> AppResult<Vec<ShareGrant>>;

    /// Insert a link. Returns `None` if the token is already in use.
    async fn insert_link(&self, data: &NewShareLink) -> AppResult<Option<ShareLink>>;

    /// Links on a file, oldest first.
    async fn list_links(&self, file_id: FileId) -> AppResult<Vec<ShareLink>>;

    /// Atomically validate and consume a link, granting its file to `redeemer`.
    async fn redeem_link(
        &self,
        token: &str,
        redeemer: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<RedeemOutcome>;

    /// Remove links consumed or expired before `cutoff`.
    async fn purge_links(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}
