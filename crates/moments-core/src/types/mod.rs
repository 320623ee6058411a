//! Shared domain types used across crates.

pub mod clock;
pub mod id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use id::{RouteId, UserId};
