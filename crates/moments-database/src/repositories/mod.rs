//! PostgreSQL implementations of the store traits.

pub mod route;
pub mod user;

pub use route::PgRouteRepository;
pub use user::PgUserRepository;

use moments_core::error::{AppError, ErrorKind};

/// Wrap a sqlx failure as a store-unavailable error.
pub(crate) fn store_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::StoreUnavailable, context, e)
}
