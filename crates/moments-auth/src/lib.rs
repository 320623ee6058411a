//! # moments-auth
//!
//! Caller authentication for MapMoments. Tokens are issued by the account
//! service with a shared HMAC secret; this crate verifies them and, for
//! tests and tooling, mints compatible ones.
//!
//! ## Modules
//!
//! - `jwt`: claims, verification, and minting

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
