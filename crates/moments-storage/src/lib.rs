//! # moments-storage
//!
//! Upload signers for route photos. Clients upload directly to object
//! storage with a presigned URL; the application only records the public
//! CDN address of each object.

pub mod cdn;
pub mod manager;
pub mod providers;

pub use cdn::CdnUrlBuilder;
pub use manager::build_upload_signer;
