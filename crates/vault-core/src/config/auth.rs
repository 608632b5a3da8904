//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer token verification settings.
///
/// Tokens are issued by the external identity service; the vault only
/// verifies them, so no TTL or password policy lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 token verification.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Clock skew tolerated when checking `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            leeway_seconds: default_leeway(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    5
}
