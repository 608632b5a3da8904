//! One-time expiring share links.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tracing::{info, warn};

use vault_core::config::SharingConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::FileId;
use vault_database::{RedeemOutcome, VaultStore};
use vault_entity::permission::PermissionLevel;
use vault_entity::share::{NewShareLink, ShareGrant, ShareLink};

use super::load_shareable_file;
use crate::context::RequestContext;

/// Longest token accepted for redemption.
const MAX_TOKEN_LEN: usize = 256;

/// Message for every refused redemption so callers cannot probe link state.
const REDEEM_REFUSED: &str = "Invalid or expired link";

/// Issues, redeems, and audits shareable links.
#[derive(Debug, Clone)]
pub struct LinkIssuer {
    store: Arc<dyn VaultStore>,
    config: SharingConfig,
}

impl LinkIssuer {
    /// Creates a new link issuer.
    pub fn new(store: Arc<dyn VaultStore>, config: SharingConfig) -> Self {
        Self { store, config }
    }

    /// Generate a URL-safe token from `token_bytes` of OS randomness.
    pub fn generate_token(&self) -> String {
        let mut bytes = vec![0u8; self.config.token_bytes];
        rand::rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Issue a link for a file.
    ///
    /// `expiration_hours` defaults to `sharing.default_link_hours` and
    /// `permission` to `view`. The file's `is_shared` flag is untouched
    /// until the link is redeemed.
    pub async fn create_link(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        expiration_hours: Option<i64>,
        permission: Option<PermissionLevel>,
    ) -> AppResult<ShareLink> {
        let hours = expiration_hours.unwrap_or(self.config.default_link_hours);
        if hours <= 0 {
            return Err(AppError::validation(
                "expiration_hours must be a positive number of hours",
            ));
        }
        if hours > self.config.max_link_hours {
            return Err(AppError::validation(format!(
                "expiration_hours must not exceed {}",
                self.config.max_link_hours
            )));
        }

        let file = load_shareable_file(self.store.as_ref(), ctx, file_id).await?;
        let permission = permission.unwrap_or_default();
        let expires_at = Utc::now() + Duration::hours(hours);

        for attempt in 1..=self.config.token_attempts {
            let request = NewShareLink {
                file_id: file.id,
                token: self.generate_token(),
                permission,
                created_by: ctx.user_id,
                expires_at,
            };
            if let Some(link) = self.store.insert_link(&request).await? {
                info!(
                    user_id = %ctx.user_id,
                    file_id = %file.id,
                    link_id = %link.id,
                    permission = %permission,
                    expires_at = %link.expires_at,
                    ip = ctx.ip_address.as_deref(),
                    "Share link created"
                );
                return Ok(link);
            }
            warn!(file_id = %file.id, attempt, "Share link token collision, retrying");
        }

        Err(AppError::internal("Failed to allocate a unique share link token"))
    }

    /// Exchange a link token for a grant on its file.
    ///
    /// Unknown tokens fail with `NotFound`; consumed, expired, and malformed
    /// tokens fail with the same `Forbidden` error.
    pub async fn redeem(&self, ctx: &RequestContext, token: &str) -> AppResult<ShareGrant> {
        self.redeem_at(ctx, token, Utc::now()).await
    }

    async fn redeem_at(
        &self,
        ctx: &RequestContext,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ShareGrant> {
        if !is_well_formed(token) {
            return Err(AppError::forbidden(REDEEM_REFUSED));
        }

        match self.store.redeem_link(token, ctx.user_id, now).await? {
            RedeemOutcome::Redeemed { link, grant } => {
                info!(
                    user_id = %ctx.user_id,
                    file_id = %link.file_id,
                    link_id = %link.id,
                    permission = %grant.permission,
                    ip = ctx.ip_address.as_deref(),
                    "Share link redeemed"
                );
                Ok(grant)
            }
            RedeemOutcome::Rejected => {
                warn!(user_id = %ctx.user_id, "Refused redemption of spent or expired link");
                Err(AppError::forbidden(REDEEM_REFUSED))
            }
            RedeemOutcome::Unknown => Err(AppError::not_found("Share link not found")),
        }
    }

    /// Links issued for a file, oldest first.
    pub async fn list_links(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
    ) -> AppResult<Vec<ShareLink>> {
        let file = load_shareable_file(self.store.as_ref(), ctx, file_id).await?;
        self.store.list_links(file.id).await
    }

    /// Delete links that were consumed or expired before `cutoff`.
    pub async fn purge(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let removed = self.store.purge_links(cutoff).await?;
        info!(removed, cutoff = %cutoff, "Purged stale share links");
        Ok(removed)
    }
}

/// Whether `token` could have been produced by [`LinkIssuer::generate_token`].
fn is_well_formed(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
