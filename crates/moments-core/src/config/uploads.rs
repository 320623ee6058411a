//! Photo upload configuration.

use serde::{Deserialize, Serialize};

/// Object storage and CDN settings for route photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Signer: `"s3"` or `"direct"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Upload endpoint used by the `direct` provider.
    #[serde(default = "default_direct_endpoint")]
    pub direct_endpoint: String,
    /// Destination bucket.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Public CDN origin that serves uploaded photos.
    #[serde(default = "default_cdn_domain")]
    pub cdn_domain: String,
    /// Validity of a presigned upload URL, in seconds.
    #[serde(default = "default_url_ttl")]
    pub url_ttl_seconds: u64,
    /// Maximum number of files per upload-URL request.
    #[serde(default = "default_max_files")]
    pub max_files_per_request: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            direct_endpoint: default_direct_endpoint(),
            bucket: default_bucket(),
            region: default_region(),
            cdn_domain: default_cdn_domain(),
            url_ttl_seconds: default_url_ttl(),
            max_files_per_request: default_max_files(),
        }
    }
}

fn default_provider() -> String {
    "s3".to_string()
}

fn default_direct_endpoint() -> String {
    "http://localhost:9000/mapmymoment-image".to_string()
}

fn default_bucket() -> String {
    "mapmymoment-image".to_string()
}

fn default_region() -> String {
    "ap-south-1".to_string()
}

fn default_cdn_domain() -> String {
    "https://d20v9h61x1jwiy.cloudfront.net".to_string()
}

fn default_url_ttl() -> u64 {
    600
}

fn default_max_files() -> usize {
    30
}
