//! # vault-api
//!
//! HTTP API layer for SecureVault built on Axum.
//!
//! Exposes the file catalog, share registry, and link issuer under `/api`,
//! together with bearer-token authentication, CORS, request logging, and
//! the mapping from `AppError` to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
