//! File listing and metadata access.

use std::sync::Arc;

use tracing::debug;

use vault_auth::{AccessDecision, AccessEvaluator};
use vault_core::result::AppResult;
use vault_core::types::FileId;
use vault_database::{VaultStore, VisibilityScope};
use vault_entity::file::File;
use vault_entity::permission::PermissionLevel;
use vault_entity::user::UserRole;

use super::require_file;
use crate::context::RequestContext;

/// Lists files by privilege tier and serves file metadata.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    store: Arc<dyn VaultStore>,
    evaluator: Arc<AccessEvaluator>,
}

impl FileCatalog {
    /// Creates a new file catalog.
    pub fn new(store: Arc<dyn VaultStore>, evaluator: Arc<AccessEvaluator>) -> Self {
        Self { store, evaluator }
    }

    /// Files visible to the requester, newest upload first.
    ///
    /// Admins see everything; standard users see their own files plus
    /// shared files granted to them; restricted users see only the latter.
    pub async fn list_visible(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        let scope = match ctx.role {
            UserRole::Admin => VisibilityScope::All,
            UserRole::Standard => VisibilityScope::OwnedOrShared(ctx.user_id),
            UserRole::Restricted => VisibilityScope::SharedWith(ctx.user_id),
        };
        let files = self.store.list_files(scope).await?;
        debug!(user_id = %ctx.user_id, count = files.len(), "Listed visible files");
        Ok(files)
    }

    /// Metadata of a file the requester can at least view.
    pub async fn get(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<File> {
        let file = require_file(self.store.as_ref(), file_id).await?;
        self.evaluator
            .authorize(&file, &ctx.principal(), PermissionLevel::View)
            .await?;
        Ok(file)
    }

    /// The requester's effective access to a file.
    pub async fn access(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<AccessDecision> {
        let file = require_file(self.store.as_ref(), file_id).await?;
        self.evaluator.resolve(&file, Some(&ctx.principal())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::{Grantee, LinkIssuer, ShareRegistry};
    use crate::test_support;
    use vault_auth::AccessSource;
    use vault_core::config::SharingConfig;
    use vault_core::error::ErrorKind;

    fn catalog(store: Arc<dyn VaultStore>) -> FileCatalog {
        FileCatalog::new(store.clone(), Arc::new(AccessEvaluator::new(store)))
    }

    #[tokio::test]
    async fn test_visibility_union() {
        let (mem, store) = test_support::store();
        let catalog = catalog(store.clone());
        let registry = ShareRegistry::new(store);
        let a = test_support::user(&mem, "a", UserRole::Standard).await;
        let b = test_support::user(&mem, "b", UserRole::Standard).await;
        let c = test_support::user(&mem, "c", UserRole::Standard).await;
        let admin = test_support::user(&mem, "admin", UserRole::Admin).await;
        let f = test_support::file(&mem, &a, "f.enc").await;

        registry
            .grant_access(&a, f.id, Grantee::Id(b.user_id), PermissionLevel::View)
            .await
            .unwrap();

        let ids = |files: Vec<File>| files.into_iter().map(|f| f.id).collect::<Vec<_>>();
        assert_eq!(ids(catalog.list_visible(&a).await.unwrap()), vec![f.id]);
        assert_eq!(ids(catalog.list_visible(&b).await.unwrap()), vec![f.id]);
        assert!(catalog.list_visible(&c).await.unwrap().is_empty());
        assert_eq!(ids(catalog.list_visible(&admin).await.unwrap()), vec![f.id]);
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_and_deduplicated() {
        let (mem, store) = test_support::store();
        let catalog = catalog(store.clone());
        let registry = ShareRegistry::new(store);
        let a = test_support::user(&mem, "a", UserRole::Standard).await;
        let b = test_support::user(&mem, "b", UserRole::Standard).await;
        let older = test_support::file(&mem, &a, "older.enc").await;
        let newer = test_support::file(&mem, &a, "newer.enc").await;
        let from_b = test_support::file(&mem, &b, "from_b.enc").await;

        // Owned and granted to self: must still appear once.
        registry
            .grant_access(&a, older.id, Grantee::Id(a.user_id), PermissionLevel::View)
            .await
            .unwrap();
        registry
            .grant_access(&b, from_b.id, Grantee::Id(a.user_id), PermissionLevel::View)
            .await
            .unwrap();

        let listed: Vec<FileId> = catalog
            .list_visible(&a)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(listed, vec![from_b.id, newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_restricted_user_sees_only_grants() {
        let (mem, store) = test_support::store();
        let catalog = catalog(store.clone());
        let issuer = LinkIssuer::new(store, SharingConfig::default());
        let a = test_support::user(&mem, "a", UserRole::Standard).await;
        let guest = test_support::user(&mem, "guest", UserRole::Restricted).await;
        let shared = test_support::file(&mem, &a, "shared.enc").await;
        test_support::file(&mem, &a, "private.enc").await;
        // A record owned by a restricted user is still invisible to them.
        test_support::file(&mem, &guest, "odd.enc").await;

        assert!(catalog.list_visible(&guest).await.unwrap().is_empty());

        let link = issuer
            .create_link(&a, shared.id, Some(1), Some(PermissionLevel::Download))
            .await
            .unwrap();
        issuer.redeem(&guest, &link.token).await.unwrap();

        let visible = catalog.list_visible(&guest).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, shared.id);
        assert!(visible[0].is_shared);
    }

    #[tokio::test]
    async fn test_get_requires_view() {
        let (mem, store) = test_support::store();
        let catalog = catalog(store);
        let a = test_support::user(&mem, "a", UserRole::Standard).await;
        let c = test_support::user(&mem, "c", UserRole::Standard).await;
        let f = test_support::file(&mem, &a, "f.enc").await;

        assert_eq!(catalog.get(&a, f.id).await.unwrap(), f);
        assert_eq!(
            catalog.get(&c, f.id).await.unwrap_err().kind,
            ErrorKind::Forbidden
        );
        assert_eq!(
            catalog.get(&a, FileId::new()).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_access_reports_source() {
        let (mem, store) = test_support::store();
        let catalog = catalog(store);
        let a = test_support::user(&mem, "a", UserRole::Standard).await;
        let c = test_support::user(&mem, "c", UserRole::Standard).await;
        let f = test_support::file(&mem, &a, "f.enc").await;

        let owner = catalog.access(&a, f.id).await.unwrap();
        assert_eq!(owner.source, AccessSource::Owner);
        let stranger = catalog.access(&c, f.id).await.unwrap();
        assert_eq!(stranger.level, None);
        assert_eq!(stranger.source, AccessSource::Denied);
    }
}
