//! Waypoints and photo references carried by a route.

use serde::{Deserialize, Serialize};

/// A geographic point along a route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// Client-assigned waypoint identifier.
    #[serde(default)]
    pub id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Postal address, if known.
    #[serde(default)]
    pub address: String,
}

/// A photo attached to a route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Object name within the route's folder.
    pub filename: String,
    /// Public CDN URL. Empty until derived from the filename.
    #[serde(default)]
    pub cloudfront_url: String,
}

impl Photo {
    /// Fill in the CDN URL from `{cdn}/{route_id}/{filename}` when absent.
    pub fn with_default_url(mut self, cdn_domain: &str, route_id: &str) -> Self {
        if self.cloudfront_url.is_empty() {
            self.cloudfront_url = format!(
                "{}/{}/{}",
                cdn_domain.trim_end_matches('/'),
                route_id,
                self.filename
            );
        }
        self
    }
}
