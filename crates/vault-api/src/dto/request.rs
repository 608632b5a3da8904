//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use vault_core::error::AppError;
use vault_core::types::UserId;
use vault_entity::permission::PermissionLevel;
use vault_service::Grantee;

/// Run `validator` rules and turn failures into a validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

fn parse_permission(raw: Option<&str>) -> Result<Option<PermissionLevel>, AppError> {
    raw.map(str::parse::<PermissionLevel>).transpose()
}

/// Body of `POST /api/files/{id}/shares`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareRequest {
    /// Grantee's email address.
    #[validate(email(message = "shared_with_email must be an email address"))]
    pub shared_with_email: Option<String>,
    /// Grantee's user id.
    pub shared_with_id: Option<Uuid>,
    /// `view` or `download`; defaults to `view`.
    pub permission: Option<String>,
}

impl CreateShareRequest {
    /// Resolve which user the request names. Exactly one field must be set.
    pub fn grantee(&self) -> Result<Grantee, AppError> {
        match (&self.shared_with_email, self.shared_with_id) {
            (Some(email), None) => Ok(Grantee::Email(email.clone())),
            (None, Some(id)) => Ok(Grantee::Id(UserId::from_uuid(id))),
            (Some(_), Some(_)) => Err(AppError::validation(
                "Provide only one of shared_with_email and shared_with_id",
            )),
            (None, None) => Err(AppError::validation(
                "shared_with_email or shared_with_id is required",
            )),
        }
    }

    /// Requested level, defaulting to `view`.
    pub fn permission(&self) -> Result<PermissionLevel, AppError> {
        Ok(parse_permission(self.permission.as_deref())?.unwrap_or_default())
    }
}

/// Body of `POST /api/files/{id}/links`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Hours until the link expires.
    #[validate(range(min = 1, message = "expiration_hours must be at least 1"))]
    pub expiration_hours: Option<i64>,
    /// Level the link confers.
    pub permission: Option<String>,
}

impl CreateLinkRequest {
    /// Requested level, if any.
    pub fn permission(&self) -> Result<Option<PermissionLevel>, AppError> {
        parse_permission(self.permission.as_deref())
    }
}
