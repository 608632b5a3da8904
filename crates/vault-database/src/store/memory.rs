//! In-memory [`VaultStore`] using a Tokio mutex.
//!
//! Every operation runs under one lock, so multi-record updates such as
//! link redemption are atomic. Suitable for single-process development
//! and tests only; nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::{FileId, ShareGrantId, ShareLinkId, UserId};
use vault_entity::file::{CreateFile, File};
use vault_entity::share::{NewShareGrant, NewShareLink, ShareGrant, ShareLink};
use vault_entity::user::{CreateUser, User};

use super::{GrantOutcome, RedeemOutcome, VaultStore, VisibilityScope};

#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<UserId, User>,
    /// Insertion order doubles as the tie-breaker for equal timestamps.
    files: Vec<File>,
    grants: Vec<ShareGrant>,
    links: Vec<ShareLink>,
}

impl InnerState {
    fn file_mut(&mut self, id: FileId) -> AppResult<&mut File> {
        self.files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    fn grant_for(&self, file_id: FileId, grantee_id: UserId) -> Option<&ShareGrant> {
        self.grants
            .iter()
            .find(|g| g.file_id == file_id && g.grantee_id == grantee_id)
    }

    fn has_grant(&self, file_id: FileId, grantee_id: UserId) -> bool {
        self.grant_for(file_id, grantee_id).is_some()
    }

    fn create_or_fetch_grant(
        &mut self,
        data: &NewShareGrant,
        now: DateTime<Utc>,
    ) -> AppResult<GrantOutcome> {
        if let Some(existing) = self.grant_for(data.file_id, data.grantee_id) {
            return Ok(GrantOutcome {
                grant: existing.clone(),
                created: false,
            });
        }

        self.file_mut(data.file_id)?.is_shared = true;
        let grant = ShareGrant {
            id: ShareGrantId::new(),
            file_id: data.file_id,
            grantee_id: data.grantee_id,
            permission: data.permission,
            created_at: now,
        };
        self.grants.push(grant.clone());
        Ok(GrantOutcome {
            grant,
            created: true,
        })
    }
}

/// In-memory store for single-process deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryVaultStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryVaultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VaultStore for MemoryVaultStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upsert_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;

        let email = data.email.trim();
        let clash = state.users.values().any(|u| {
            u.id != data.id
                && (same_email(&u.email, email) || u.username == data.username)
        });
        if clash {
            return Err(AppError::conflict(
                "A user with that username or email already exists",
            ));
        }

        let created_at = state
            .users
            .get(&data.id)
            .map(|u| u.created_at)
            .unwrap_or_else(Utc::now);
        let user = User {
            id: data.id,
            username: data.username.clone(),
            email: email.to_string(),
            role: data.role,
            created_at,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim();
        Ok(self
            .state
            .lock()
            .await
            .users
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.state.lock().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create_file(&self, data: &CreateFile) -> AppResult<File> {
        let mut state = self.state.lock().await;
        if state.files.iter().any(|f| f.id == data.id) {
            return Err(AppError::conflict(format!("File {} already exists", data.id)));
        }
        let file = File {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name.clone(),
            content_type: data.content_type.clone(),
            size_bytes: data.size_bytes,
            is_shared: false,
            created_at: Utc::now(),
        };
        state.files.push(file.clone());
        Ok(file)
    }

    async fn find_file(&self, id: FileId) -> AppResult<Option<File>> {
        let state = self.state.lock().await;
        Ok(state.files.iter().find(|f| f.id == id).cloned())
    }

    async fn list_files(&self, scope: VisibilityScope) -> AppResult<Vec<File>> {
        let state = self.state.lock().await;
        let mut files: Vec<File> = state
            .files
            .iter()
            .rev()
            .filter(|f| match scope {
                VisibilityScope::All => true,
                VisibilityScope::OwnedOrShared(user_id) => {
                    f.owner_id == user_id || (f.is_shared && state.has_grant(f.id, user_id))
                }
                VisibilityScope::SharedWith(user_id) => {
                    f.is_shared && state.has_grant(f.id, user_id)
                }
            })
            .cloned()
            .collect();
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(files)
    }

    async fn find_grant(
        &self,
        file_id: FileId,
        grantee_id: UserId,
    ) -> AppResult<Option<ShareGrant>> {
        Ok(self.state.lock().await.grant_for(file_id, grantee_id).cloned())
    }

    async fn create_or_fetch_grant(&self, data: &NewShareGrant) -> AppResult<GrantOutcome> {
        self.state
            .lock()
            .await
            .create_or_fetch_grant(data, Utc::now())
    }

    async fn list_grants(&self, file_id: FileId) -> AppResult<Vec<ShareGrant>> {
        let state = self.state.lock().await;
        Ok(state
            .grants
            .iter()
            .filter(|g| g.file_id == file_id)
            .cloned()
            .collect())
    }

    async fn insert_link(&self, data: &NewShareLink) -> AppResult<Option<ShareLink>> {
        let mut state = self.state.lock().await;
        if state.links.iter().any(|l| l.token == data.token) {
            return Ok(None);
        }
        let link = ShareLink {
            id: ShareLinkId::new(),
            file_id: data.file_id,
            token: data.token.clone(),
            permission: data.permission,
            created_by: data.created_by,
            created_at: Utc::now(),
            expires_at: data.expires_at,
            consumed: false,
            consumed_by: None,
            consumed_at: None,
        };
        state.links.push(link.clone());
        Ok(Some(link))
    }

    async fn list_links(&self, file_id: FileId) -> AppResult<Vec<ShareLink>> {
        let state = self.state.lock().await;
        Ok(state
            .links
            .iter()
            .filter(|l| l.file_id == file_id)
            .cloned()
            .collect())
    }

    async fn redeem_link(
        &self,
        token: &str,
        redeemer: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<RedeemOutcome> {
        let mut state = self.state.lock().await;

        let Some(index) = state.links.iter().position(|l| l.token == token) else {
            return Ok(RedeemOutcome::Unknown);
        };
        if !state.links[index].is_valid_at(now) {
            return Ok(RedeemOutcome::Rejected);
        }

        let link = &state.links[index];
        let request = NewShareGrant {
            file_id: link.file_id,
            grantee_id: redeemer,
            permission: link.permission,
        };
        // Grant first: it is the only step that can fail, and nothing has
        // been mutated yet if it does.
        let outcome = state.create_or_fetch_grant(&request, now)?;
        state.file_mut(request.file_id)?.is_shared = true;

        let link = &mut state.links[index];
        link.consumed = true;
        link.consumed_by = Some(redeemer);
        link.consumed_at = Some(now);

        Ok(RedeemOutcome::Redeemed {
            link: link.clone(),
            grant: outcome.grant,
        })
    }

    async fn purge_links(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.links.len();
        state.links.retain(|l| {
            let expired = l.expires_at < cutoff;
            let spent = l.consumed && l.consumed_at.is_some_and(|at| at < cutoff);
            !(expired || spent)
        });
        Ok((before - state.links.len()) as u64)
    }
}

/// Case-insensitive email match, Unicode-aware like PostgreSQL's `LOWER()`.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
