//! Route domain entities.

pub mod model;
pub mod waypoint;

pub use model::{CreateRoute, Route, UpdateRoute};
pub use waypoint::{Photo, Waypoint};
