//! Store traits consumed by the service layer.
//!
//! Every method is concretely typed: routes go in and come out as
//! [`Route`], never as loosely typed documents. Implementations must make
//! each single-route mutation atomic with respect to concurrent callers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use moments_core::result::AppResult;
use moments_core::types::{RouteId, UserId};
use moments_entity::route::{Photo, Route, UpdateRoute};
use moments_entity::share::{Collaborator, ShareGrant};
use moments_entity::user::User;

/// Per-field instruction for a partial document update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldOp<T> {
    /// Leave the stored value untouched.
    #[default]
    Keep,
    /// Replace the stored value.
    Set(T),
    /// Remove the stored value.
    Unset,
}

impl<T> FieldOp<T> {
    /// Apply this operation to an optional slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *slot = Some(value),
            Self::Unset => *slot = None,
        }
    }
}

/// Atomic update of a route's sharing fields.
///
/// `shared_with: Unset` empties the collaborator set. `updated_at` is
/// always written.
#[derive(Debug, Clone, Default)]
pub struct RouteFieldUpdate {
    /// Share token.
    pub share_token: FieldOp<String>,
    /// Share token expiry.
    pub share_token_expiry: FieldOp<DateTime<Utc>>,
    /// Collaborator set.
    pub shared_with: FieldOp<Vec<Collaborator>>,
    /// New modification time, epoch milliseconds.
    pub updated_at: i64,
}

/// Result of a conditional collaborator insert.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The collaborator was appended; carries the updated route.
    Added(Route),
    /// The user was already a collaborator; carries the unchanged route.
    AlreadyPresent(Route),
    /// The route is gone or no longer carries a usable token.
    TokenRejected,
}

/// Persistence for route documents and their share records.
#[async_trait]
pub trait RouteStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new route.
    async fn create_route(&self, route: &Route) -> AppResult<()>;

    /// Fetch a route by ID.
    async fn get_route(&self, id: &RouteId) -> AppResult<Option<Route>>;

    /// List all routes, newest first.
    async fn list_routes(&self) -> AppResult<Vec<Route>>;

    /// List the routes created by `creator`, newest first.
    async fn list_routes_by_creator(&self, creator: &UserId) -> AppResult<Vec<Route>>;

    /// Replace a route's content fields. Sharing fields are untouched.
    /// Returns `None` when the route does not exist.
    async fn update_route_content(
        &self,
        id: &RouteId,
        content: &UpdateRoute,
        updated_at: i64,
    ) -> AppResult<Option<Route>>;

    /// Append photos to a route in one update.
    async fn append_photos(
        &self,
        id: &RouteId,
        photos: &[Photo],
        updated_at: i64,
    ) -> AppResult<Option<Route>>;

    /// Delete a route. Returns `false` when nothing was deleted.
    async fn delete_route(&self, id: &RouteId) -> AppResult<bool>;

    /// Apply a partial update to the sharing fields. Returns `false` when
    /// the route does not exist.
    async fn update_route_fields(&self, id: &RouteId, update: RouteFieldUpdate)
    -> AppResult<bool>;

    /// Append `collaborator` unless a collaborator with the same user ID is
    /// already present, provided the route still carries `token` and the
    /// token has not expired at `now`. Check and append are one atomic step.
    async fn add_collaborator_if_absent(
        &self,
        id: &RouteId,
        token: &str,
        now: DateTime<Utc>,
        collaborator: &Collaborator,
        updated_at: i64,
    ) -> AppResult<AddOutcome>;

    /// Find the route whose token equals `token` and whose expiry is absent
    /// or strictly after `now`.
    async fn find_route_by_share_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Route>>;

    /// Find routes whose collaborator set contains `user`.
    async fn find_routes_containing_collaborator(&self, user: &UserId) -> AppResult<Vec<Route>>;

    /// Record a share grant.
    async fn insert_share_grant(&self, grant: &ShareGrant) -> AppResult<()>;

    /// Delete the share grants of a route. Returns the number removed.
    async fn delete_auxiliary_records(&self, id: &RouteId) -> AppResult<u64>;

    /// Check store connectivity.
    async fn health_check(&self) -> AppResult<()>;
}

/// Read access to user profiles.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look up a user by email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert or replace a user profile.
    async fn upsert_user(&self, user: &User) -> AppResult<()>;
}
