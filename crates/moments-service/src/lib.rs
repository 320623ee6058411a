//! # moments-service
//!
//! Business logic service layer for MapMoments. Each service orchestrates
//! the document store and collaborators to implement one group of use
//! cases: route permissions, share tokens, collaborator admission, route
//! CRUD, and photo uploads.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Nothing is cached between
//! calls; every permission check re-reads the store.

pub mod background;
pub mod context;
pub mod deadline;
pub mod permission;
pub mod route;
pub mod share;

#[cfg(test)]
pub(crate) mod testing;

pub use background::BackgroundWrites;
pub use context::RequestContext;
pub use deadline::StoreDeadline;
pub use permission::PermissionResolver;
pub use route::{PhotoUploadService, RouteService};
pub use share::{CollaboratorAdmission, ShareService, ShareTokenManager};
