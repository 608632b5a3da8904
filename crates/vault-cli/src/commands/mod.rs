//! CLI command definitions and dispatch.

pub mod link;
pub mod migrate;
pub mod user;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use vault_core::config::{AppConfig, DatabaseBackend};
use vault_database::{DatabasePool, PgVaultStore, VaultStore};

use crate::output::OutputFormat;

/// SecureVault: encrypted file storage with access control and sharing
#[derive(Debug, Parser)]
#[command(name = "vault-cli", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(short, long, env = "VAULT_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User directory management
    User(user::UserArgs),
    /// Share link maintenance
    Link(link::LinkArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = AppConfig::load_from(&self.config, &self.env)
            .with_context(|| format!("Failed to load configuration from {}", self.config))?;

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Link(args) => link::execute(args, &config).await,
        }
    }
}

/// Connect to the configured PostgreSQL database.
pub async fn connect(config: &AppConfig) -> anyhow::Result<DatabasePool> {
    if config.database.backend != DatabaseBackend::Postgres {
        bail!("CLI commands require database.backend = \"postgres\"");
    }
    DatabasePool::connect(&config.database)
        .await
        .context("Failed to connect to the database")
}

/// Open the record store the server would use.
pub async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn VaultStore>> {
    let pool = connect(config).await?;
    Ok(Arc::new(PgVaultStore::new(pool.into_pool())))
}
