//! Reverse-lookup share records.

use chrono::{DateTime, Utc};
use moments_core::types::{RouteId, UserId};
use serde::{Deserialize, Serialize};

use super::permission::SharePermission;

/// One record per successful join. Advisory only; the route's embedded
/// collaborator set is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareGrant {
    /// Collaborator identity.
    pub user_id: UserId,
    /// Route joined.
    pub route_id: RouteId,
    /// Granted permission.
    pub permission: SharePermission,
    /// When the grant was recorded.
    pub shared_at: DateTime<Utc>,
}
