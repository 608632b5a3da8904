//! Grant-level permissions.

pub mod level;

pub use level::PermissionLevel;
