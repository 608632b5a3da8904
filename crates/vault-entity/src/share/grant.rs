//! Share grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vault_core::types::{FileId, ShareGrantId, UserId};

use crate::permission::PermissionLevel;

/// A standing, non-expiring grant of access to one file for one user.
///
/// At most one grant exists per `(file_id, grantee_id)`; the store enforces
/// this with a unique index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareGrant {
    /// Unique grant identifier.
    pub id: ShareGrantId,
    /// The shared file.
    pub file_id: FileId,
    /// The user receiving access.
    pub grantee_id: UserId,
    /// Level granted.
    pub permission: PermissionLevel,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShareGrant {
    /// The file to share.
    pub file_id: FileId,
    /// The user receiving access.
    pub grantee_id: UserId,
    /// Level to grant if no grant exists yet.
    pub permission: PermissionLevel,
}
