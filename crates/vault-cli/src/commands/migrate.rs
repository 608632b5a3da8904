//! Database migration management commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use vault_core::config::AppConfig;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> anyhow::Result<()> {
    match &args.command {
        MigrateCommand::Run => {
            let pool = super::connect(config).await?;
            println!("Running database migrations...");
            pool.migrate().await.context("Migration failed")?;
            output::print_success("All migrations applied successfully.");
        }
    }
    Ok(())
}
