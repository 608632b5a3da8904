//! Direct share grants and one-time shareable links.

pub mod grant;
pub mod link;

pub use grant::{NewShareGrant, ShareGrant};
pub use link::{NewShareLink, ShareLink};
