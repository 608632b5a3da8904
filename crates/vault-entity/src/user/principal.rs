//! The authenticated requester.

use serde::{Deserialize, Serialize};

use vault_core::types::UserId;

use super::role::UserRole;

/// Identity and tier of whoever is making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The requester.
    pub user_id: UserId,
    /// The requester's tier.
    pub role: UserRole,
}

impl Principal {
    /// Build a principal.
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Check if this principal is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
