//! Claims carried by identity-service access tokens.

use serde::{Deserialize, Serialize};

use vault_core::types::UserId;
use vault_entity::user::{Principal, UserRole};

/// JWT claims payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Privilege tier at the time of issuance.
    pub role: UserRole,
    /// Username for logging.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The requester identity these claims describe.
    pub fn principal(&self) -> Principal {
        Principal::new(self.sub, self.role)
    }
}
