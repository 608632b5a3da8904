//! Encrypted file records.

pub mod model;

pub use model::{CreateFile, File};
