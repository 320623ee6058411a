//! Route sharing facade used by the HTTP handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use moments_core::error::AppError;
use moments_core::types::RouteId;
use moments_database::{RouteStore, UserStore};
use moments_entity::route::Route;
use moments_entity::share::Collaborator;
use moments_entity::user::User;

use super::admission::CollaboratorAdmission;
use super::token::{MintedToken, ShareTokenManager};
use crate::context::RequestContext;
use crate::deadline::StoreDeadline;
use crate::permission::PermissionResolver;

/// Sharing state of a route as seen by its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareInfo {
    /// Current token, if sharing is active.
    pub share_token: Option<String>,
    /// Token expiry, if any.
    pub share_token_expiry: Option<DateTime<Utc>>,
    /// Collaborator entries.
    pub shared_with: Vec<Collaborator>,
    /// Profiles of the creator followed by each collaborator that could be
    /// found.
    pub users: Vec<User>,
}

/// Orchestrates share, share-info, revoke, token lookup, join, and the
/// shared-with-me listing.
#[derive(Debug, Clone)]
pub struct ShareService {
    routes: Arc<dyn RouteStore>,
    users: Arc<dyn UserStore>,
    permissions: PermissionResolver,
    tokens: ShareTokenManager,
    admission: CollaboratorAdmission,
    deadline: StoreDeadline,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        routes: Arc<dyn RouteStore>,
        users: Arc<dyn UserStore>,
        permissions: PermissionResolver,
        tokens: ShareTokenManager,
        admission: CollaboratorAdmission,
        deadline: StoreDeadline,
    ) -> Self {
        Self {
            routes,
            users,
            permissions,
            tokens,
            admission,
            deadline,
        }
    }

    /// Mint a share token for a route the caller owns.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        route_id: &RouteId,
        expiry_hours: Option<i64>,
    ) -> Result<MintedToken, AppError> {
        self.tokens.mint(&ctx.user_id, route_id, expiry_hours).await
    }

    /// Sharing state of a route the caller owns.
    pub async fn get_share_info(
        &self,
        ctx: &RequestContext,
        route_id: &RouteId,
    ) -> Result<ShareInfo, AppError> {
        let route = self.permissions.require_owner(&ctx.user_id, route_id).await?;
        let users = self.resolve_identities(&route).await;

        Ok(ShareInfo {
            share_token: route.share_token,
            share_token_expiry: route.share_token_expiry,
            shared_with: route.shared_with,
            users,
        })
    }

    /// Stop sharing a route the caller owns.
    pub async fn revoke_share(
        &self,
        ctx: &RequestContext,
        route_id: &RouteId,
    ) -> Result<(), AppError> {
        self.tokens.revoke(&ctx.user_id, route_id).await
    }

    /// Preview the route behind a token. No authentication required.
    pub async fn get_by_token(&self, token: &str) -> Result<Route, AppError> {
        Ok(self.tokens.resolve(token).await?.redacted())
    }

    /// Join the route behind a token.
    pub async fn join(&self, ctx: &RequestContext, token: &str) -> Result<Route, AppError> {
        Ok(self.admission.join(ctx, token).await?.redacted())
    }

    /// Routes the caller has joined as a collaborator.
    pub async fn list_shared_for_user(&self, ctx: &RequestContext) -> Result<Vec<Route>, AppError> {
        let routes = self
            .deadline
            .run(
                "find_routes_containing_collaborator",
                self.routes.find_routes_containing_collaborator(&ctx.user_id),
            )
            .await?;
        Ok(routes.into_iter().map(Route::redacted).collect())
    }

    /// Look up the creator, then each collaborator, by email. Missing
    /// profiles and failed lookups are skipped.
    async fn resolve_identities(&self, route: &Route) -> Vec<User> {
        let emails = std::iter::once(route.creator_id.as_str())
            .chain(route.shared_with.iter().map(|c| c.email.as_str()));

        let mut users = Vec::with_capacity(route.shared_with.len() + 1);
        for email in emails {
            match self
                .deadline
                .run("find_user_by_email", self.users.find_user_by_email(email))
                .await
            {
                Ok(Some(user)) => users.push(user),
                Ok(None) => debug!(route_id = %route.id, email, "No profile for route member"),
                Err(e) => warn!(route_id = %route.id, email, error = %e, "Profile lookup failed"),
            }
        }
        users
    }
}
