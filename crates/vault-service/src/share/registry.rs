//! Direct user-to-file share grants.

use std::sync::Arc;

use tracing::{debug, info};

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_database::{GrantOutcome, VaultStore};
use vault_entity::permission::PermissionLevel;
use vault_entity::share::{NewShareGrant, ShareGrant};
use vault_entity::user::User;

use super::load_shareable_file;
use crate::context::RequestContext;

/// How the caller names the user to share with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grantee {
    /// Look the user up by email address.
    Email(String),
    /// Use a known user id.
    Id(UserId),
}

/// Creates and lists direct share grants.
#[derive(Debug, Clone)]
pub struct ShareRegistry {
    store: Arc<dyn VaultStore>,
}

impl ShareRegistry {
    /// Creates a new share registry.
    pub fn new(store: Arc<dyn VaultStore>) -> Self {
        Self { store }
    }

    async fn resolve_grantee(&self, grantee: &Grantee) -> AppResult<User> {
        let found = match grantee {
            Grantee::Email(email) => {
                let email = email.trim();
                if email.is_empty() {
                    return Err(AppError::validation("Grantee email must not be empty"));
                }
                self.store.find_user_by_email(email).await?
            }
            Grantee::Id(id) => self.store.find_user(*id).await?,
        };
        found.ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Grant `grantee` access to a file.
    ///
    /// Repeating the call for the same pair returns the existing grant with
    /// its original permission; `created` tells the two cases apart.
    pub async fn grant_access(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        grantee: Grantee,
        permission: PermissionLevel,
    ) -> AppResult<GrantOutcome> {
        let file = load_shareable_file(self.store.as_ref(), ctx, file_id).await?;
        let grantee = self.resolve_grantee(&grantee).await?;

        let outcome = self
            .store
            .create_or_fetch_grant(&NewShareGrant {
                file_id: file.id,
                grantee_id: grantee.id,
                permission,
            })
            .await?;

        if outcome.created {
            info!(
                user_id = %ctx.user_id,
                file_id = %file.id,
                grantee_id = %grantee.id,
                permission = %permission,
                ip = ctx.ip_address.as_deref(),
                "Share grant created"
            );
        } else {
            debug!(
                file_id = %file.id,
                grantee_id = %grantee.id,
                kept = %outcome.grant.permission,
                "Share grant already existed"
            );
        }
        Ok(outcome)
    }

    /// Grants on a file in creation order.
    pub async fn list_shares(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
    ) -> AppResult<Vec<ShareGrant>> {
        let file = load_shareable_file(self.store.as_ref(), ctx, file_id).await?;
        self.store.list_grants(file.id).await
    }
}
