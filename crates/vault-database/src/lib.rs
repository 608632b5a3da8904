//! # vault-database
//!
//! PostgreSQL connection management, migrations, and repositories for
//! SecureVault, plus the [`VaultStore`] trait with PostgreSQL and
//! in-memory implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{
    GrantOutcome, MemoryVaultStore, PgVaultStore, RedeemOutcome, VaultStore, VisibilityScope,
};
