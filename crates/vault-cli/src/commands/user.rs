//! User directory CLI commands.
//!
//! Users are owned by the identity service; these commands mirror them
//! into the local directory so files can be shared with them by email.

use anyhow::Context;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use vault_core::config::AppConfig;
use vault_core::types::UserId;
use vault_database::VaultStore;
use vault_entity::user::{CreateUser, User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Add or update a user
    Add {
        /// Username
        username: String,
        /// Email address (prompted for when omitted)
        #[arg(short, long)]
        email: Option<String>,
        /// Role: admin, standard, or restricted
        #[arg(short, long, default_value = "standard")]
        role: String,
        /// Identity service user id; a new id is generated when omitted
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    role: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let store = super::open_store(config).await?;

    match &args.command {
        UserCommand::Add {
            username,
            email,
            role,
            id,
        } => {
            let role: UserRole = role.parse()?;
            let email = match email {
                Some(email) => email.clone(),
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Email")
                    .interact_text()
                    .context("Failed to read email")?,
            };

            let user = store
                .upsert_user(&CreateUser {
                    id: id.map(UserId::from_uuid).unwrap_or_default(),
                    username: username.trim().to_string(),
                    email: email.trim().to_string(),
                    role,
                })
                .await
                .with_context(|| format!("Failed to save user '{username}'"))?;

            output::print_success(&format!("User '{}' saved", user.username));
            output::print_item(&UserRow::from(&user), format);
        }
        UserCommand::List => {
            let users = store.list_users().await.context("Failed to list users")?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
