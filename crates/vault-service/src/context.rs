//! Request context carrying the authenticated requester.

use serde::{Deserialize, Serialize};

use vault_core::types::UserId;
use vault_entity::file::File;
use vault_entity::user::{Principal, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API extractor from verified token claims and passed into
/// service methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's tier at the time the token was issued.
    pub role: UserRole,
    /// The username (convenience field from token claims).
    pub username: String,
    /// Client address reported by the proxy, recorded in service logs.
    pub ip_address: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole, username: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            username: username.into(),
            ip_address: None,
        }
    }

    /// Attach the client address.
    pub fn with_ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    /// The requester as seen by the access evaluator.
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role)
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this requester may extend access to `file`.
    pub fn can_share(&self, file: &File) -> bool {
        self.is_admin() || file.is_owned_by(self.user_id)
    }
}
