//! Blob store implementations.

pub mod local;
pub mod memory;
