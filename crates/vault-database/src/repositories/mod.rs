//! PostgreSQL repositories for vault entities.

pub mod file;
pub mod grant;
pub mod link;
pub mod user;

use vault_core::error::{AppError, ErrorKind};

pub use file::FileRepository;
pub use grant::ShareGrantRepository;
pub use link::ShareLinkRepository;
pub use user::UserRepository;

/// Map a failed write, reporting a dangling reference as `NotFound`.
pub(crate) fn write_error(e: sqlx::Error, message: &'static str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            let missing = match db.constraint() {
                Some(name) if name.contains("file_id") => "File not found",
                _ => "User not found",
            };
            AppError::with_source(ErrorKind::NotFound, missing, e)
        }
        _ => AppError::with_source(ErrorKind::Database, message, e),
    }
}
