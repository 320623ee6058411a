//! # moments-core
//!
//! Core crate for MapMoments. Contains configuration schemas, typed
//! identifiers, the clock abstraction, collaborator traits, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other MapMoments crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
