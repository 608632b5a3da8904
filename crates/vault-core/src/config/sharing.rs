//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Settings for shareable link issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Expiry horizon used when the caller does not supply one.
    #[serde(default = "default_link_hours")]
    pub default_link_hours: i64,
    /// Longest expiry horizon a caller may request.
    #[serde(default = "default_max_link_hours")]
    pub max_link_hours: i64,
    /// Random bytes per link token.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
    /// How many fresh tokens to try before giving up on a collision.
    #[serde(default = "default_token_attempts")]
    pub token_attempts: u32,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            default_link_hours: default_link_hours(),
            max_link_hours: default_max_link_hours(),
            token_bytes: default_token_bytes(),
            token_attempts: default_token_attempts(),
        }
    }
}

fn default_link_hours() -> i64 {
    24
}

fn default_max_link_hours() -> i64 {
    720
}

fn default_token_bytes() -> usize {
    32
}

fn default_token_attempts() -> u32 {
    3
}
