//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use moments_entity::route::{CreateRoute, Photo, UpdateRoute, Waypoint};

/// Body of `POST /api/routes`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Route name is required"))]
    pub name: String,
    /// Starting point.
    pub origin: Waypoint,
    /// End point.
    pub destination: Waypoint,
    /// Stops in between.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub intermediate_waypoints: Vec<Waypoint>,
    /// Photos already uploaded for the route.
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl From<CreateRouteRequest> for CreateRoute {
    fn from(req: CreateRouteRequest) -> Self {
        CreateRoute {
            name: req.name,
            origin: req.origin,
            destination: req.destination,
            intermediate_waypoints: req.intermediate_waypoints,
            photos: req.photos,
        }
    }
}

/// Body of `PUT /api/routes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Route name is required"))]
    pub name: String,
    /// Starting point.
    pub origin: Waypoint,
    /// End point.
    pub destination: Waypoint,
    /// Stops in between.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub intermediate_waypoints: Vec<Waypoint>,
    /// Full replacement photo list.
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl From<UpdateRouteRequest> for UpdateRoute {
    fn from(req: UpdateRouteRequest) -> Self {
        UpdateRoute {
            name: req.name,
            origin: req.origin,
            destination: req.destination,
            intermediate_waypoints: req.intermediate_waypoints,
            photos: req.photos,
        }
    }
}

/// Body of `POST /api/routes/{id}/share`. The whole body is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareRouteRequest {
    /// Token lifetime in hours. Absent means the token never expires.
    #[validate(range(min = 1, message = "expiryHours must be positive"))]
    pub expiry_hours: Option<i64>,
}

/// Body of `POST /api/routes/{id}/generate-upload-urls`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUploadUrlsRequest {
    /// File names to upload.
    #[validate(length(min = 1, message = "At least one filename is required"))]
    pub filenames: Vec<String>,
    /// MIME type per file, in the same order.
    #[serde(default)]
    pub content_types: Vec<String>,
}
