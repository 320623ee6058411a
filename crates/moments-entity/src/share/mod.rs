//! Share domain entities.

pub mod collaborator;
pub mod grant;
pub mod permission;

pub use collaborator::Collaborator;
pub use grant::ShareGrant;
pub use permission::{PermissionLevel, SharePermission};
