//! Upload signer implementations.

pub mod direct;
#[cfg(feature = "s3")]
pub mod s3;

pub use direct::DirectUploadSigner;
#[cfg(feature = "s3")]
pub use s3::S3UploadSigner;
