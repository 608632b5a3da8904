//! # vault-core
//!
//! Core crate for SecureVault. Contains the configuration schema, typed
//! identifiers, the blob store trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other vault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
