//! In-memory implementation of the store traits.
//!
//! Each route lives in one `DashMap` entry. Conditional updates run while
//! holding the entry's shard write lock, which gives the same single
//! document atomicity the PostgreSQL repository gets from row locks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use moments_core::error::AppError;
use moments_core::result::AppResult;
use moments_core::types::{RouteId, UserId};
use moments_entity::route::{Photo, Route, UpdateRoute};
use moments_entity::share::{Collaborator, ShareGrant};
use moments_entity::user::User;

use crate::store::{AddOutcome, FieldOp, RouteFieldUpdate, RouteStore, UserStore};

/// Process-local store. Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    routes: Arc<DashMap<RouteId, Route>>,
    grants: Arc<DashMap<RouteId, Vec<ShareGrant>>>,
    users: Arc<DashMap<String, User>>,
    fail_grant_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make share-grant writes and deletes fail with `StoreUnavailable`.
    /// Route documents are unaffected.
    pub fn set_grant_writes_failing(&self, failing: bool) {
        self.fail_grant_writes.store(failing, Ordering::SeqCst);
    }

    /// Share grants currently recorded for a route.
    pub fn grants_for(&self, id: &RouteId) -> Vec<ShareGrant> {
        self.grants
            .get(id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn check_grant_writes(&self) -> AppResult<()> {
        if self.fail_grant_writes.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable("Share grant storage unavailable"));
        }
        Ok(())
    }

    fn sorted_newest_first(mut routes: Vec<Route>) -> Vec<Route> {
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        routes
    }
}

#[async_trait]
impl RouteStore for MemoryStore {
    async fn create_route(&self, route: &Route) -> AppResult<()> {
        if self.routes.contains_key(&route.id) {
            return Err(AppError::invalid_input(format!(
                "Route '{}' already exists",
                route.id
            )));
        }
        self.routes.insert(route.id.clone(), route.clone());
        Ok(())
    }

    async fn get_route(&self, id: &RouteId) -> AppResult<Option<Route>> {
        Ok(self.routes.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_routes(&self) -> AppResult<Vec<Route>> {
        let routes = self.routes.iter().map(|e| e.value().clone()).collect();
        Ok(Self::sorted_newest_first(routes))
    }

    async fn list_routes_by_creator(&self, creator: &UserId) -> AppResult<Vec<Route>> {
        let routes = self
            .routes
            .iter()
            .filter(|e| e.value().is_creator(creator))
            .map(|e| e.value().clone())
            .collect();
        Ok(Self::sorted_newest_first(routes))
    }

    async fn update_route_content(
        &self,
        id: &RouteId,
        content: &UpdateRoute,
        updated_at: i64,
    ) -> AppResult<Option<Route>> {
        let Some(mut entry) = self.routes.get_mut(id) else {
            return Ok(None);
        };
        let route = entry.value_mut();
        route.name = content.name.clone();
        route.origin = content.origin.clone();
        route.destination = content.destination.clone();
        route.intermediate_waypoints = content.intermediate_waypoints.clone();
        route.photos = content.photos.clone();
        route.updated_at = updated_at;
        Ok(Some(route.clone()))
    }

    async fn append_photos(
        &self,
        id: &RouteId,
        photos: &[Photo],
        updated_at: i64,
    ) -> AppResult<Option<Route>> {
        let Some(mut entry) = self.routes.get_mut(id) else {
            return Ok(None);
        };
        let route = entry.value_mut();
        route.photos.extend_from_slice(photos);
        route.updated_at = updated_at;
        Ok(Some(route.clone()))
    }

    async fn delete_route(&self, id: &RouteId) -> AppResult<bool> {
        Ok(self.routes.remove(id).is_some())
    }

    async fn update_route_fields(
        &self,
        id: &RouteId,
        update: RouteFieldUpdate,
    ) -> AppResult<bool> {
        let Some(mut entry) = self.routes.get_mut(id) else {
            return Ok(false);
        };
        let route = entry.value_mut();
        update.share_token.apply_to(&mut route.share_token);
        update
            .share_token_expiry
            .apply_to(&mut route.share_token_expiry);
        match update.shared_with {
            FieldOp::Keep => {}
            FieldOp::Set(collaborators) => route.shared_with = collaborators,
            FieldOp::Unset => route.shared_with.clear(),
        }
        route.updated_at = update.updated_at;
        Ok(true)
    }

    async fn add_collaborator_if_absent(
        &self,
        id: &RouteId,
        token: &str,
        now: DateTime<Utc>,
        collaborator: &Collaborator,
        updated_at: i64,
    ) -> AppResult<AddOutcome> {
        let Some(mut entry) = self.routes.get_mut(id) else {
            return Ok(AddOutcome::TokenRejected);
        };
        let route = entry.value_mut();

        if route.share_token.as_deref() != Some(token) || !route.share_token_active_at(now) {
            return Ok(AddOutcome::TokenRejected);
        }
        if route.has_collaborator(&collaborator.user_id) {
            return Ok(AddOutcome::AlreadyPresent(route.clone()));
        }

        route.shared_with.push(collaborator.clone());
        route.updated_at = updated_at;
        debug!(route_id = %id, user_id = %collaborator.user_id, "Collaborator appended");
        Ok(AddOutcome::Added(route.clone()))
    }

    async fn find_route_by_share_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Route>> {
        Ok(self
            .routes
            .iter()
            .find(|e| {
                let route = e.value();
                route.share_token.as_deref() == Some(token) && route.share_token_active_at(now)
            })
            .map(|e| e.value().clone()))
    }

    async fn find_routes_containing_collaborator(&self, user: &UserId) -> AppResult<Vec<Route>> {
        let mut routes: Vec<Route> = self
            .routes
            .iter()
            .filter(|e| e.value().has_collaborator(user))
            .map(|e| e.value().clone())
            .collect();
        routes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(routes)
    }

    async fn insert_share_grant(&self, grant: &ShareGrant) -> AppResult<()> {
        self.check_grant_writes()?;
        self.grants
            .entry(grant.route_id.clone())
            .or_default()
            .push(grant.clone());
        Ok(())
    }

    async fn delete_auxiliary_records(&self, id: &RouteId) -> AppResult<u64> {
        self.check_grant_writes()?;
        Ok(self
            .grants
            .remove(id)
            .map(|(_, grants)| grants.len() as u64)
            .unwrap_or(0))
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(email).map(|e| e.value().clone()))
    }

    async fn upsert_user(&self, user: &User) -> AppResult<()> {
        self.users.insert(user.email.clone(), user.clone());
        Ok(())
    }
}
