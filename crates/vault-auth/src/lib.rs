//! # vault-auth
//!
//! Identity and authorization for SecureVault.
//!
//! ## Modules
//!
//! - `jwt`: verification of bearer tokens issued by the identity service
//! - `access`: the access evaluator deciding what a requester may do with a file

pub mod access;
pub mod jwt;

pub use access::{AccessDecision, AccessEvaluator, AccessSource};
pub use jwt::{Claims, JwtDecoder};
