//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vault_auth::{AccessDecision, AccessSource};
use vault_core::types::{FileId, ShareGrantId, ShareLinkId, UserId};
use vault_entity::file::File;
use vault_entity::permission::PermissionLevel;
use vault_entity::share::{ShareGrant, ShareLink};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// File metadata as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    pub id: FileId,
    pub owner_id: UserId,
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub is_shared: bool,
    pub created_at: DateTime<Utc>,
}

impl From<File> for FileResponse {
    fn from(f: File) -> Self {
        Self {
            id: f.id,
            owner_id: f.owner_id,
            name: f.name,
            content_type: f.content_type,
            size_bytes: f.size_bytes,
            is_shared: f.is_shared,
            created_at: f.created_at,
        }
    }
}

/// The requester's effective access to a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessResponse {
    pub file_id: FileId,
    /// `view`, `download`, or `null` for no access.
    pub permission: Option<PermissionLevel>,
    pub source: AccessSource,
    pub can_view: bool,
    pub can_download: bool,
}

impl AccessResponse {
    pub fn new(file_id: FileId, decision: AccessDecision) -> Self {
        Self {
            file_id,
            permission: decision.level,
            source: decision.source,
            can_view: decision.allows(PermissionLevel::View),
            can_download: decision.allows(PermissionLevel::Download),
        }
    }
}

/// A direct share grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub id: ShareGrantId,
    pub file_id: FileId,
    pub shared_with: UserId,
    pub permission: PermissionLevel,
    pub created_at: DateTime<Utc>,
}

impl From<ShareGrant> for ShareResponse {
    fn from(g: ShareGrant) -> Self {
        Self {
            id: g.id,
            file_id: g.file_id,
            shared_with: g.grantee_id,
            permission: g.permission,
            created_at: g.created_at,
        }
    }
}

/// A share link as shown to its issuer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    pub id: ShareLinkId,
    pub file_id: FileId,
    pub token: String,
    pub permission: PermissionLevel,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<DateTime<Utc>>,
}

impl From<ShareLink> for LinkResponse {
    fn from(l: ShareLink) -> Self {
        Self {
            id: l.id,
            file_id: l.file_id,
            token: l.token,
            permission: l.permission,
            created_at: l.created_at,
            expires_at: l.expires_at,
            consumed: l.consumed,
            consumed_by: l.consumed_by,
            consumed_at: l.consumed_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Metadata backend name and reachability.
    pub database: ComponentHealth,
    /// Blob provider name and reachability.
    pub storage: ComponentHealth,
}

/// Health of one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub backend: String,
    pub available: bool,
}
