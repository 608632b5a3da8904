//! Core type definitions used across the vault workspace.

pub mod id;

pub use id::*;
