//! Direct shares and one-time links.

pub mod link;
pub mod registry;

pub use link::LinkIssuer;
pub use registry::{Grantee, ShareRegistry};

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::FileId;
use vault_database::VaultStore;
use vault_entity::file::File;

use crate::context::RequestContext;

/// Load a file the requester is allowed to extend access to.
pub(crate) async fn load_shareable_file(
    store: &dyn VaultStore,
    ctx: &RequestContext,
    file_id: FileId,
) -> AppResult<File> {
    let file = store
        .find_file(file_id)
        .await?
        .ok_or_else(|| AppError::not_found("File not found"))?;
    if !ctx.can_share(&file) {
        return Err(AppError::forbidden(
            "Only the file owner or an administrator can share this file",
        ));
    }
    Ok(file)
}
