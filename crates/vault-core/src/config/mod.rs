//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod sharing;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;
pub use self::sharing::SharingConfig;
pub use self::storage::{BlobProvider, StorageConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Blob storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Share link settings.
    #[serde(default)]
    pub sharing: SharingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, an optional `config/{env}.toml`
    /// overlay, and environment variables prefixed with `VAULT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration starting from an explicit base file.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("VAULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run safely with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.sharing.token_bytes < 16 {
            return Err(AppError::configuration(
                "sharing.token_bytes must be at least 16",
            ));
        }
        if self.sharing.token_attempts == 0 {
            return Err(AppError::configuration(
                "sharing.token_attempts must be at least 1",
            ));
        }
        if self.sharing.max_link_hours < 1
            || !(1..=self.sharing.max_link_hours).contains(&self.sharing.default_link_hours)
        {
            return Err(AppError::configuration(
                "sharing.default_link_hours must be between 1 and sharing.max_link_hours",
            ));
        }
        Ok(())
    }
}
