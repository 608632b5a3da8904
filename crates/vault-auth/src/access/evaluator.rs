//! Effective permission of a requester on a file.
//!
//! Resolution order:
//! 1. Admin bypass: admins have `download` on every file.
//! 2. Owner check: the uploader has `download`.
//! 3. Share grant: the stored grant's level for (file, requester).
//! 4. Otherwise no access.
//!
//! Shareable links never grant access directly; redeeming one creates a
//! grant that step 3 then finds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_database::VaultStore;
use vault_entity::file::File;
use vault_entity::permission::PermissionLevel;
use vault_entity::user::{Principal, UserRole};

/// Outcome of evaluating a requester against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Effective level, or `None` for no access.
    pub level: Option<PermissionLevel>,
    /// Which rule produced the level.
    pub source: AccessSource,
}

/// Where an access decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// Requester is an admin.
    AdminBypass,
    /// Requester owns the file.
    Owner,
    /// A share grant exists for the requester.
    Grant,
    /// No rule applied.
    Denied,
}

impl AccessDecision {
    fn full(source: AccessSource) -> Self {
        Self {
            level: Some(PermissionLevel::Download),
            source,
        }
    }

    fn denied() -> Self {
        Self {
            level: None,
            source: AccessSource::Denied,
        }
    }

    /// Whether the decision satisfies `required`.
    pub fn allows(&self, required: PermissionLevel) -> bool {
        self.level.is_some_and(|level| level.implies(required))
    }
}

/// Computes effective permissions from ownership, tier, and share grants.
///
/// The evaluator is read-only and never checks that the file exists; callers
/// load the [`File`] first and report a missing one themselves.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    store: Arc<dyn VaultStore>,
}

impl AccessEvaluator {
    /// Creates an evaluator over the given store.
    pub fn new(store: Arc<dyn VaultStore>) -> Self {
        Self { store }
    }

    /// Effective level of `requester` on `file`; `None` means no access.
    pub async fn evaluate(
        &self,
        file: &File,
        requester: Option<&Principal>,
    ) -> AppResult<Option<PermissionLevel>> {
        Ok(self.resolve(file, requester).await?.level)
    }

    /// Like [`evaluate`](Self::evaluate), also reporting which rule applied.
    pub async fn resolve(
        &self,
        file: &File,
        requester: Option<&Principal>,
    ) -> AppResult<AccessDecision> {
        let Some(requester) = requester else {
            return Ok(AccessDecision::denied());
        };

        match requester.role {
            UserRole::Admin => return Ok(AccessDecision::full(AccessSource::AdminBypass)),
            UserRole::Standard | UserRole::Restricted => {}
        }
        if file.is_owned_by(requester.user_id) {
            return Ok(AccessDecision::full(AccessSource::Owner));
        }

        let decision = match self.store.find_grant(file.id, requester.user_id).await? {
            Some(grant) => AccessDecision {
                level: Some(grant.permission),
                source: AccessSource::Grant,
            },
            None => AccessDecision::denied(),
        };

        debug!(
            file_id = %file.id,
            user_id = %requester.user_id,
            level = ?decision.level,
            "Resolved file access"
        );
        Ok(decision)
    }

    /// Fail with `Forbidden` unless `requester` holds at least `required`.
    pub async fn authorize(
        &self,
        file: &File,
        requester: &Principal,
        required: PermissionLevel,
    ) -> AppResult<AccessDecision> {
        let decision = self.resolve(file, Some(requester)).await?;
        if decision.allows(required) {
            Ok(decision)
        } else {
            Err(AppError::forbidden(format!(
                "You do not have {required} access to this file"
            )))
        }
    }
}
