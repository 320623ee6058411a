//! # moments-entity
//!
//! Domain entity models for MapMoments. Every struct in this crate is a
//! stored document or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`; field names serialize in
//! camelCase to match the web client.

pub mod route;
pub mod share;
pub mod user;
