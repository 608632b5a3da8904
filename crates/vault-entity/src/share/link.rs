//! Shareable link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vault_core::types::{FileId, ShareLinkId, UserId};

use crate::permission::PermissionLevel;

/// A bearer capability that converts into a [`ShareGrant`] once.
///
/// [`ShareGrant`]: crate::share::ShareGrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareLink {
    /// Unique link identifier.
    pub id: ShareLinkId,
    /// The file the link grants access to.
    pub file_id: FileId,
    /// Random URL-safe token; unique across all links.
    pub token: String,
    /// Level granted on redemption.
    pub permission: PermissionLevel,
    /// The user who issued the link.
    pub created_by: UserId,
    /// When the link was issued.
    pub created_at: DateTime<Utc>,
    /// Redemption is refused at or after this instant.
    pub expires_at: DateTime<Utc>,
    /// Set by the first successful redemption.
    pub consumed: bool,
    /// Who redeemed the link.
    pub consumed_by: Option<UserId>,
    /// When the link was redeemed.
    pub consumed_at: Option<DateTime<Utc>>,
}

impl ShareLink {
    /// Whether the link can still be redeemed at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.consumed && now < self.expires_at
    }
}

/// Data required to issue a link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareLink {
    /// The file to share.
    pub file_id: FileId,
    /// Freshly generated token.
    pub token: String,
    /// Level granted on redemption.
    pub permission: PermissionLevel,
    /// The issuing user.
    pub created_by: UserId,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expires_at: DateTime<Utc>, consumed: bool) -> ShareLink {
        ShareLink {
            id: ShareLinkId::new(),
            file_id: FileId::new(),
            token: "t".to_string(),
            permission: PermissionLevel::View,
            created_by: UserId::new(),
            created_at: expires_at - Duration::hours(24),
            expires_at,
            consumed,
            consumed_by: None,
            consumed_at: None,
        }
    }

    #[test]
    fn test_valid_before_expiry() {
        let now = Utc::now();
        assert!(link(now + Duration::seconds(1), false).is_valid_at(now));
    }

    #[test]
    fn test_invalid_at_and_after_expiry() {
        let now = Utc::now();
        assert!(!link(now, false).is_valid_at(now));
        assert!(!link(now - Duration::seconds(1), false).is_valid_at(now));
    }

    #[test]
    fn test_consumed_is_invalid_regardless_of_expiry() {
        let now = Utc::now();
        assert!(!link(now + Duration::hours(5), true).is_valid_at(now));
    }
}
