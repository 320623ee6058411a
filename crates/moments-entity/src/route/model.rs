//! Route document model.

use chrono::{DateTime, Utc};
use moments_core::types::{RouteId, UserId};
use serde::{Deserialize, Serialize};

use super::waypoint::{Photo, Waypoint};
use crate::share::Collaborator;

/// A named trip with waypoints, photos, and sharing state.
///
/// Documents written before sharing existed lack `sharedWith`; they
/// deserialize with an empty collaborator set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Unique route identifier.
    #[serde(rename = "_id")]
    pub id: RouteId,
    /// Display name.
    pub name: String,
    /// Email of the user who created the route. Implicit owner.
    pub creator_id: UserId,
    /// Starting point.
    pub origin: Waypoint,
    /// End point.
    pub destination: Waypoint,
    /// Ordered stops between origin and destination.
    #[serde(default)]
    pub intermediate_waypoints: Vec<Waypoint>,
    /// Attached photos.
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    /// Last modification time, epoch milliseconds.
    pub updated_at: i64,
    /// Whether the route is publicly listed.
    #[serde(default)]
    pub is_public: bool,
    /// Users admitted through a share token, unique by `user_id`.
    #[serde(default)]
    pub shared_with: Vec<Collaborator>,
    /// Current share token, if sharing is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    /// When the share token stops being accepted. `None` means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token_expiry: Option<DateTime<Utc>>,
}

impl Route {
    /// Check whether `user` created this route.
    pub fn is_creator(&self, user: &UserId) -> bool {
        &self.creator_id == user
    }

    /// Find the collaborator entry for `user`.
    pub fn collaborator(&self, user: &UserId) -> Option<&Collaborator> {
        self.shared_with.iter().find(|c| &c.user_id == user)
    }

    /// Check whether `user` is in the collaborator set.
    pub fn has_collaborator(&self, user: &UserId) -> bool {
        self.collaborator(user).is_some()
    }

    /// Check whether the stored token may still be used at `now`.
    pub fn share_token_active_at(&self, now: DateTime<Utc>) -> bool {
        self.share_token.is_some() && self.share_token_expiry.is_none_or(|expiry| expiry > now)
    }

    /// Strip the share token and expiry for views served without owner
    /// permission.
    pub fn redacted(mut self) -> Self {
        self.share_token = None;
        self.share_token_expiry = None;
        self
    }
}

/// Data required to create a new route.
#[derive(Debug, Clone)]
pub struct CreateRoute {
    /// Display name.
    pub name: String,
    /// Starting point.
    pub origin: Waypoint,
    /// End point.
    pub destination: Waypoint,
    /// Ordered stops.
    pub intermediate_waypoints: Vec<Waypoint>,
    /// Initial photos.
    pub photos: Vec<Photo>,
}

/// Replacement content for an existing route. Sharing fields are never
/// part of an update.
#[derive(Debug, Clone)]
pub struct UpdateRoute {
    /// Display name.
    pub name: String,
    /// Starting point.
    pub origin: Waypoint,
    /// End point.
    pub destination: Waypoint,
    /// Ordered stops.
    pub intermediate_waypoints: Vec<Waypoint>,
    /// Full photo list.
    pub photos: Vec<Photo>,
}
