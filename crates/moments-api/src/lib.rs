//! MapMoments HTTP API layer.
//!
//! Axum router, shared state, extractors, DTOs, handlers, and middleware.
//! Every handler delegates to the service crate and reports failures
//! through [`error::ApiError`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
