//! # vault-entity
//!
//! Domain entity models for SecureVault. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod file;
pub mod permission;
pub mod share;
pub mod user;
