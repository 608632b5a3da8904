//! # vault-service
//!
//! Business logic for SecureVault: the share registry, the link issuer,
//! and the file catalog with upload and download.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod share;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::RequestContext;
pub use file::{DownloadService, DownloadedFile, FileCatalog, UploadFile, UploadService};
pub use share::{Grantee, LinkIssuer, ShareRegistry};
