//! Permission levels on a route.

use serde::{Deserialize, Serialize};

/// Permission stored on a collaborator entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    /// May view the route and add photos.
    Upload,
}

impl SharePermission {
    /// Return the permission as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
        }
    }
}

impl std::fmt::Display for SharePermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective permission of a user on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// The route creator.
    Owner,
    /// An admitted collaborator.
    Upload,
    /// No access beyond public views.
    None,
}

impl PermissionLevel {
    /// Owner only.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Owner or upload collaborator.
    pub fn can_upload(&self) -> bool {
        matches!(self, Self::Owner | Self::Upload)
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Upload => "upload",
            Self::None => "none",
        }
    }
}

impl From<SharePermission> for PermissionLevel {
    fn from(permission: SharePermission) -> Self {
        match permission {
            SharePermission::Upload => Self::Upload,
        }
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
