//! Effective permission of a user on a route.
//!
//! Resolution order:
//! 1. The route must exist, otherwise `NotFound`
//! 2. The creator is always `Owner`, even if a collaborator entry names them
//! 3. A collaborator gets the permission stored on their entry
//! 4. Everyone else gets `None`

use std::sync::Arc;

use tracing::debug;

use moments_core::error::AppError;
use moments_core::types::{RouteId, UserId};
use moments_database::RouteStore;
use moments_entity::route::Route;
use moments_entity::share::PermissionLevel;

use crate::deadline::StoreDeadline;

/// Resolves `(user, route)` pairs to a [`PermissionLevel`].
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    routes: Arc<dyn RouteStore>,
    deadline: StoreDeadline,
}

impl PermissionResolver {
    /// Creates a new resolver.
    pub fn new(routes: Arc<dyn RouteStore>, deadline: StoreDeadline) -> Self {
        Self { routes, deadline }
    }

    /// Permission `user` holds on an already loaded route.
    pub fn level_for(route: &Route, user: &UserId) -> PermissionLevel {
        if route.is_creator(user) {
            return PermissionLevel::Owner;
        }
        route
            .collaborator(user)
            .map(|c| PermissionLevel::from(c.permission))
            .unwrap_or(PermissionLevel::None)
    }

    /// Resolve the permission of `user` on `route_id`.
    pub async fn resolve_permission(
        &self,
        user: &UserId,
        route_id: &RouteId,
    ) -> Result<PermissionLevel, AppError> {
        let route = self.load(route_id).await?;
        Ok(Self::level_for(&route, user))
    }

    /// Load the route and require `user` to own it.
    pub async fn require_owner(&self, user: &UserId, route_id: &RouteId) -> Result<Route, AppError> {
        let route = self.load(route_id).await?;
        let level = Self::level_for(&route, user);
        if !level.is_owner() {
            debug!(user_id = %user, route_id = %route_id, level = %level, "Owner permission denied");
            return Err(AppError::forbidden(
                "Only the route owner can perform this action",
            ));
        }
        Ok(route)
    }

    /// Load the route and require `user` to own it or hold upload permission.
    pub async fn require_upload(
        &self,
        user: &UserId,
        route_id: &RouteId,
    ) -> Result<Route, AppError> {
        let route = self.load(route_id).await?;
        let level = Self::level_for(&route, user);
        if !level.can_upload() {
            debug!(user_id = %user, route_id = %route_id, "Upload permission denied");
            return Err(AppError::forbidden(
                "You don't have permission to upload photos to this route",
            ));
        }
        Ok(route)
    }

    async fn load(&self, route_id: &RouteId) -> Result<Route, AppError> {
        self.deadline
            .run("get_route", self.routes.get_route(route_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Route '{route_id}' not found")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use moments_core::ErrorKind;
    use moments_entity::share::Collaborator;

    use super::*;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_levels() {
        let fx = Fixture::new();
        let route = fx.route_owned_by("alice@example.com").await;
        fx.push_collaborator(&route.id, "bob@example.com").await;

        let resolver = fx.resolver();
        for (user, expected) in [
            ("alice@example.com", PermissionLevel::Owner),
            ("bob@example.com", PermissionLevel::Upload),
            ("carol@example.com", PermissionLevel::None),
        ] {
            let level = resolver
                .resolve_permission(&UserId::from(user), &route.id)
                .await
                .unwrap();
            assert_eq!(level, expected, "{user}");
        }
    }

    #[tokio::test]
    async fn test_stranger_has_no_access_to_unshared_route() {
        let fx = Fixture::new();
        let route = fx.route_owned_by("alice@example.com").await;
        let stored = fx.stored(&route.id).await;
        assert!(stored.share_token.is_none());
        assert!(stored.shared_with.is_empty());

        let resolver = fx.resolver();
        for user in ["carol@example.com", "dave@example.com"] {
            let level = resolver
                .resolve_permission(&UserId::from(user), &route.id)
                .await
                .unwrap();
            assert_eq!(level, PermissionLevel::None, "{user}");
            let err = resolver
                .require_upload(&UserId::from(user), &route.id)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Forbidden, "{user}");
        }
    }

    #[tokio::test]
    async fn test_missing_route_is_not_found() {
        let fx = Fixture::new();
        let err = fx
            .resolver()
            .resolve_permission(&"alice@example.com".into(), &"nope".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_creator_wins_over_collaborator_entry() {
        let fx = Fixture::new();
        let route = fx.route_owned_by("alice@example.com").await;
        fx.push_collaborator(&route.id, "alice@example.com").await;

        let level = fx
            .resolver()
            .resolve_permission(&"alice@example.com".into(), &route.id)
            .await
            .unwrap();
        assert_eq!(level, PermissionLevel::Owner);
    }

    #[test]
    fn test_level_for_is_pure() {
        let mut route = crate::testing::sample_route("r1", "alice@example.com");
        route.shared_with.push(Collaborator::upload(
            "bob@example.com".into(),
            "bob@example.com",
            Utc::now(),
        ));
        let before = route.clone();
        assert_eq!(
            PermissionResolver::level_for(&route, &"bob@example.com".into()),
            PermissionLevel::Upload
        );
        assert_eq!(route, before);
    }

    #[tokio::test]
    async fn test_require_owner_forbids_collaborator() {
        let fx = Fixture::new();
        let route = fx.route_owned_by("alice@example.com").await;
        fx.push_collaborator(&route.id, "bob@example.com").await;

        let err = fx
            .resolver()
            .require_owner(&"bob@example.com".into(), &route.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        assert!(
            fx.resolver()
                .require_upload(&"bob@example.com".into(), &route.id)
                .await
                .is_ok()
        );
    }
}
