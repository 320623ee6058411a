//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, OptionalAuthUser};
pub use json::ValidatedJson;
