//! Collaborator entries embedded in a route.

use chrono::{DateTime, Utc};
use moments_core::types::UserId;
use serde::{Deserialize, Serialize};

use super::permission::SharePermission;

/// A user admitted to a route through a share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    /// Identity of the collaborator.
    pub user_id: UserId,
    /// Email recorded at admission.
    pub email: String,
    /// Granted permission.
    pub permission: SharePermission,
    /// When the collaborator joined.
    pub shared_at: DateTime<Utc>,
}

impl Collaborator {
    /// Build an upload collaborator admitted at `shared_at`.
    pub fn upload(user_id: UserId, email: impl Into<String>, shared_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email: email.into(),
            permission: SharePermission::Upload,
            shared_at,
        }
    }
}
