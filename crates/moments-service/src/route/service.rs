//! Route CRUD service.

use std::sync::Arc;

use tracing::info;

use moments_core::error::AppError;
use moments_core::types::{Clock, RouteId};
use moments_database::RouteStore;
use moments_entity::route::{CreateRoute, Photo, Route, UpdateRoute};

use crate::background::BackgroundWrites;
use crate::context::RequestContext;
use crate::deadline::StoreDeadline;
use crate::permission::PermissionResolver;

/// Creates, reads, updates, and deletes routes.
#[derive(Debug, Clone)]
pub struct RouteService {
    routes: Arc<dyn RouteStore>,
    permissions: PermissionResolver,
    clock: Arc<dyn Clock>,
    deadline: StoreDeadline,
    background: BackgroundWrites,
    cdn_domain: String,
}

impl RouteService {
    /// Creates a new route service.
    pub fn new(
        routes: Arc<dyn RouteStore>,
        permissions: PermissionResolver,
        clock: Arc<dyn Clock>,
        deadline: StoreDeadline,
        background: BackgroundWrites,
        cdn_domain: impl Into<String>,
    ) -> Self {
        Self {
            routes,
            permissions,
            clock,
            deadline,
            background,
            cdn_domain: cdn_domain.into(),
        }
    }

    /// Create a route owned by the caller.
    pub async fn create_route(
        &self,
        ctx: &RequestContext,
        input: CreateRoute,
    ) -> Result<Route, AppError> {
        let id = RouteId::generate();
        let now = self.clock.now().timestamp_millis();
        let route = Route {
            photos: self.with_photo_urls(&id, input.photos),
            id,
            name: input.name,
            creator_id: ctx.user_id.clone(),
            origin: input.origin,
            destination: input.destination,
            intermediate_waypoints: input.intermediate_waypoints,
            created_at: now,
            updated_at: now,
            is_public: false,
            shared_with: Vec::new(),
            share_token: None,
            share_token_expiry: None,
        };

        self.deadline
            .run("create_route", self.routes.create_route(&route))
            .await?;

        info!(route_id = %route.id, user_id = %ctx.user_id, "Route created");
        Ok(route)
    }

    /// Fetch a route. Sharing state is redacted unless `viewer` owns it.
    pub async fn get_route(
        &self,
        viewer: Option<&RequestContext>,
        route_id: &RouteId,
    ) -> Result<Route, AppError> {
        let route = self
            .deadline
            .run("get_route", self.routes.get_route(route_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Route '{route_id}' not found")))?;

        match viewer {
            Some(ctx) if route.is_creator(&ctx.user_id) => Ok(route),
            _ => Ok(route.redacted()),
        }
    }

    /// All routes, for public display.
    pub async fn list_routes(&self) -> Result<Vec<Route>, AppError> {
        let routes = self
            .deadline
            .run("list_routes", self.routes.list_routes())
            .await?;
        Ok(routes.into_iter().map(Route::redacted).collect())
    }

    /// Routes the caller created, including their sharing state.
    pub async fn list_my_routes(&self, ctx: &RequestContext) -> Result<Vec<Route>, AppError> {
        self.deadline
            .run(
                "list_routes_by_creator",
                self.routes.list_routes_by_creator(&ctx.user_id),
            )
            .await
    }

    /// Replace the content of a route the caller owns. Sharing state is
    /// left as it is.
    pub async fn update_route(
        &self,
        ctx: &RequestContext,
        route_id: &RouteId,
        mut input: UpdateRoute,
    ) -> Result<Route, AppError> {
        self.permissions.require_owner(&ctx.user_id, route_id).await?;

        input.photos = self.with_photo_urls(route_id, std::mem::take(&mut input.photos));
        let now = self.clock.now().timestamp_millis();

        let route = self
            .deadline
            .run(
                "update_route_content",
                self.routes.update_route_content(route_id, &input, now),
            )
            .await?
            .ok_or_else(|| AppError::not_found(format!("Route '{route_id}' not found")))?;

        info!(route_id = %route_id, user_id = %ctx.user_id, "Route updated");
        Ok(route)
    }

    /// Delete a route the caller owns, then its share grants on a
    /// best-effort basis.
    pub async fn delete_route(&self, ctx: &RequestContext, route_id: &RouteId) -> Result<(), AppError> {
        self.permissions.require_owner(&ctx.user_id, route_id).await?;

        let deleted = self
            .deadline
            .run("delete_route", self.routes.delete_route(route_id))
            .await?;
        if !deleted {
            return Err(AppError::not_found(format!("Route '{route_id}' not found")));
        }
        info!(route_id = %route_id, user_id = %ctx.user_id, "Route deleted");

        let routes = Arc::clone(&self.routes);
        let id = route_id.clone();
        self.background
            .spawn("delete_auxiliary_records", route_id.clone(), async move {
                routes.delete_auxiliary_records(&id).await
            });
        Ok(())
    }

    fn with_photo_urls(&self, route_id: &RouteId, photos: Vec<Photo>) -> Vec<Photo> {
        photos
            .into_iter()
            .map(|p| p.with_default_url(&self.cdn_domain, route_id.as_str()))
            .collect()
    }
}
