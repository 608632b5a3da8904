//! User directory model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vault_core::types::UserId;

use super::role::UserRole;

/// A user known to the vault, as mirrored from the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address, used to address direct shares.
    pub email: String,
    /// Privilege tier.
    pub role: UserRole,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a user in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Id assigned by the identity service.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Privilege tier.
    pub role: UserRole,
}
