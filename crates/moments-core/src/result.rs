//! Convenience result type alias for MapMoments.

use crate::error::AppError;

/// A specialized `Result` type for MapMoments operations.
pub type AppResult<T> = Result<T, AppError>;
