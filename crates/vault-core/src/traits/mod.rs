//! Core traits defined in `vault-core` and implemented by other crates.

pub mod blob;

pub use blob::{BlobStore, EncryptedBlob};
