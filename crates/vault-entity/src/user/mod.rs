//! Directory users and the authenticated principal.

pub mod model;
pub mod principal;
pub mod role;

pub use model::{CreateUser, User};
pub use principal::Principal;
pub use role::UserRole;
