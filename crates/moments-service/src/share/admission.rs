//! Admission of share-token holders into a route's collaborator set.

use std::sync::Arc;

use tracing::info;

use moments_core::error::AppError;
use moments_core::types::Clock;
use moments_database::{AddOutcome, RouteStore};
use moments_entity::route::Route;
use moments_entity::share::{Collaborator, ShareGrant};

use super::token::ShareTokenManager;
use crate::background::BackgroundWrites;
use crate::context::RequestContext;
use crate::deadline::StoreDeadline;

/// Adds authenticated users to a route exactly once per user.
#[derive(Debug, Clone)]
pub struct CollaboratorAdmission {
    routes: Arc<dyn RouteStore>,
    tokens: ShareTokenManager,
    clock: Arc<dyn Clock>,
    deadline: StoreDeadline,
    background: BackgroundWrites,
}

impl CollaboratorAdmission {
    /// Creates a new admission service.
    pub fn new(
        routes: Arc<dyn RouteStore>,
        tokens: ShareTokenManager,
        clock: Arc<dyn Clock>,
        deadline: StoreDeadline,
        background: BackgroundWrites,
    ) -> Self {
        Self {
            routes,
            tokens,
            clock,
            deadline,
            background,
        }
    }

    /// Join the route behind `token` with upload permission.
    ///
    /// Joining twice is a no-op that returns the route unchanged. The
    /// creator cannot join their own route.
    pub async fn join(&self, ctx: &RequestContext, token: &str) -> Result<Route, AppError> {
        let route = self.tokens.resolve(token).await?;

        if route.is_creator(&ctx.user_id) {
            return Err(AppError::already_owner("You are the owner of this route"));
        }

        let now = self.clock.now();
        let collaborator = Collaborator::upload(ctx.user_id.clone(), ctx.email.clone(), now);

        let outcome = self
            .deadline
            .run(
                "add_collaborator_if_absent",
                self.routes.add_collaborator_if_absent(
                    &route.id,
                    token.trim(),
                    now,
                    &collaborator,
                    now.timestamp_millis(),
                ),
            )
            .await?;

        match outcome {
            AddOutcome::Added(updated) => {
                info!(route_id = %updated.id, user_id = %ctx.user_id, "Collaborator joined route");
                self.record_grant(&updated, &collaborator);
                Ok(updated)
            }
            AddOutcome::AlreadyPresent(existing) => {
                info!(route_id = %existing.id, user_id = %ctx.user_id, "Collaborator already present");
                Ok(existing)
            }
            AddOutcome::TokenRejected => Err(AppError::not_found_or_expired(
                "Share link not found or expired",
            )),
        }
    }

    fn record_grant(&self, route: &Route, collaborator: &Collaborator) {
        let grant = ShareGrant {
            user_id: collaborator.user_id.clone(),
            route_id: route.id.clone(),
            permission: collaborator.permission,
            shared_at: collaborator.shared_at,
        };
        let routes = Arc::clone(&self.routes);
        self.background
            .spawn("insert_share_grant", route.id.clone(), async move {
                routes.insert_share_grant(&grant).await
            });
    }
}
