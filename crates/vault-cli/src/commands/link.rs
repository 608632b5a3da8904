//! Share link maintenance commands.

use anyhow::{Context, bail};
use chrono::{Duration, Utc};
use clap::{Args, Subcommand};

use vault_core::config::AppConfig;
use vault_service::LinkIssuer;

use crate::output;

/// Arguments for link commands
#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Link subcommand
    #[command(subcommand)]
    pub command: LinkCommand,
}

/// Link subcommands
#[derive(Debug, Subcommand)]
pub enum LinkCommand {
    /// Delete links that were consumed or expired
    Prune {
        /// Only delete links that became unusable at least this many hours ago
        #[arg(long, default_value_t = 0)]
        older_than_hours: i64,
    },
}

/// Execute link commands
pub async fn execute(args: &LinkArgs, config: &AppConfig) -> anyhow::Result<()> {
    match &args.command {
        LinkCommand::Prune { older_than_hours } => {
            if *older_than_hours < 0 {
                bail!("--older-than-hours must not be negative");
            }
            let store = super::open_store(config).await?;
            let issuer = LinkIssuer::new(store, config.sharing.clone());

            let cutoff = Utc::now() - Duration::hours(*older_than_hours);
            let removed = issuer.purge(cutoff).await.context("Failed to prune links")?;
            output::print_success(&format!("Removed {removed} stale share link(s)"));
        }
    }
    Ok(())
}
