//! Route CRUD and photo uploads.

pub mod service;
pub mod upload;

pub use service::RouteService;
pub use upload::{PhotoUploadService, UploadUrl};
