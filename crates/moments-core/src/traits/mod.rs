//! Core trait definitions implemented by infrastructure crates.

pub mod upload;

pub use upload::UploadSigner;
