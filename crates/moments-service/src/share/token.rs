//! Share token lifecycle: mint, resolve, revoke.
//!
//! A route is either unshared (no token) or shared (one token, optional
//! expiry). Minting replaces any previous token without touching the
//! collaborator set; revoking clears the token and every collaborator.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use moments_core::config::SharingConfig;
use moments_core::error::AppError;
use moments_core::types::{Clock, RouteId, UserId};
use moments_database::{FieldOp, RouteFieldUpdate, RouteStore};
use moments_entity::route::Route;

use super::link::generate_share_token;
use crate::background::BackgroundWrites;
use crate::deadline::StoreDeadline;
use crate::permission::PermissionResolver;

/// A freshly minted share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedToken {
    /// The token to hand to recipients.
    pub share_token: String,
    /// When the token stops working. `None` means never.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Mints, validates, and revokes route share tokens.
#[derive(Debug, Clone)]
pub struct ShareTokenManager {
    routes: Arc<dyn RouteStore>,
    permissions: PermissionResolver,
    clock: Arc<dyn Clock>,
    deadline: StoreDeadline,
    background: BackgroundWrites,
}

impl ShareTokenManager {
    /// Creates a new token manager.
    pub fn new(
        routes: Arc<dyn RouteStore>,
        permissions: PermissionResolver,
        clock: Arc<dyn Clock>,
        background: BackgroundWrites,
        config: &SharingConfig,
    ) -> Self {
        Self {
            routes,
            permissions,
            clock,
            deadline: StoreDeadline::from_config(config),
            background,
        }
    }

    /// Mint a new token for `route_id`. Owner only.
    pub async fn mint(
        &self,
        caller: &UserId,
        route_id: &RouteId,
        expiry_hours: Option<i64>,
    ) -> Result<MintedToken, AppError> {
        self.permissions.require_owner(caller, route_id).await?;

        let now = self.clock.now();
        let expires_at = expiry_hours.map(|hours| expiry_after(now, hours)).transpose()?;
        let share_token = generate_share_token();

        let update = RouteFieldUpdate {
            share_token: FieldOp::Set(share_token.clone()),
            share_token_expiry: expires_at.map_or(FieldOp::Unset, FieldOp::Set),
            shared_with: FieldOp::Keep,
            updated_at: now.timestamp_millis(),
        };
        let updated = self
            .deadline
            .run(
                "update_route_fields",
                self.routes.update_route_fields(route_id, update),
            )
            .await?;
        if !updated {
            return Err(AppError::not_found(format!("Route '{route_id}' not found")));
        }

        info!(
            route_id = %route_id,
            user_id = %caller,
            expires_at = ?expires_at,
            "Share token minted"
        );

        Ok(MintedToken {
            share_token,
            expires_at,
        })
    }

    /// Find the route a token currently grants access to.
    ///
    /// Unknown and expired tokens fail identically.
    pub async fn resolve(&self, token: &str) -> Result<Route, AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(not_found_or_expired());
        }
        let now = self.clock.now();
        self.deadline
            .run(
                "find_route_by_share_token",
                self.routes.find_route_by_share_token(token, now),
            )
            .await?
            .ok_or_else(not_found_or_expired)
    }

    /// Revoke sharing on `route_id`. Owner only. Clears the token, the
    /// expiry, and every collaborator in one update, then deletes the
    /// route's share grants on a best-effort basis.
    pub async fn revoke(&self, caller: &UserId, route_id: &RouteId) -> Result<(), AppError> {
        self.permissions.require_owner(caller, route_id).await?;

        let update = RouteFieldUpdate {
            share_token: FieldOp::Unset,
            share_token_expiry: FieldOp::Unset,
            shared_with: FieldOp::Unset,
            updated_at: self.clock.now().timestamp_millis(),
        };
        let updated = self
            .deadline
            .run(
                "update_route_fields",
                self.routes.update_route_fields(route_id, update),
            )
            .await?;
        if !updated {
            return Err(AppError::not_found(format!("Route '{route_id}' not found")));
        }

        info!(route_id = %route_id, user_id = %caller, "Route sharing revoked");

        let routes = Arc::clone(&self.routes);
        let id = route_id.clone();
        self.background
            .spawn("delete_auxiliary_records", route_id.clone(), async move {
                routes.delete_auxiliary_records(&id).await
            });

        Ok(())
    }
}

/// `now + hours`, for any positive hour count the timestamp type can hold.
fn expiry_after(now: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>, AppError> {
    if hours < 1 {
        return Err(AppError::invalid_input("expiryHours must be at least 1"));
    }
    TimeDelta::try_hours(hours)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| {
            AppError::invalid_input(format!("expiryHours {hours} is too far in the future"))
        })
}

fn not_found_or_expired() -> AppError {
    AppError::not_found_or_expired("Share link not found or expired")
}
