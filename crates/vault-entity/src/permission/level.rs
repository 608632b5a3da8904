//! Permission levels carried by grants and links.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a grant or link allows on a single file.
///
/// Levels are ordered: `Download` implies `View`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "permission_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Metadata and listing only.
    #[default]
    View,
    /// Fetch ciphertext and wrapped key.
    Download,
}

impl PermissionLevel {
    /// Whether holding `self` satisfies a requirement of `required`.
    pub fn implies(&self, required: PermissionLevel) -> bool {
        *self >= required
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Download => "download",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = vault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "download" => Ok(Self::Download),
            _ => Err(vault_core::AppError::validation(format!(
                "Invalid permission: '{s}'. Expected one of: view, download"
            ))),
        }
    }
}
