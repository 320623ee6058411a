//! # moments-database
//!
//! Persistence for MapMoments. Defines the [`RouteStore`] and [`UserStore`]
//! traits consumed by the service layer, a PostgreSQL implementation with
//! JSONB route documents, and an in-memory implementation over `dashmap`.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{PgRouteRepository, PgUserRepository};
pub use store::{AddOutcome, FieldOp, RouteFieldUpdate, RouteStore, UserStore};
