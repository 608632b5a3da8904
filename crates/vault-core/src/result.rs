//! Convenience result type alias for SecureVault.

use crate::error::AppError;

/// A specialized `Result` type for vault operations.
pub type AppResult<T> = Result<T, AppError>;
