//! Route permission resolution.

pub mod resolver;

pub use resolver::PermissionResolver;
