//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege tiers supplied by the identity service.
///
/// Tiers only decide the ownership bypass and how wide the file listing is;
/// grant-level permissions are carried by [`PermissionLevel`].
///
/// [`PermissionLevel`]: crate::permission::PermissionLevel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Sees and may download every file.
    Admin,
    /// Uploads files and sees its own plus those shared with it.
    #[serde(alias = "regular")]
    Standard,
    /// Sees only files shared with it; cannot upload.
    #[serde(alias = "guest")]
    Restricted,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether users of this tier may upload files.
    pub fn can_upload(&self) -> bool {
        match self {
            Self::Admin | Self::Standard => true,
            Self::Restricted => false,
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Standard => "standard",
            Self::Restricted => "restricted",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = vault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "standard" | "regular" => Ok(Self::Standard),
            "restricted" | "guest" => Ok(Self::Restricted),
            _ => Err(vault_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, standard, restricted"
            ))),
        }
    }
}
