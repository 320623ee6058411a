//! Public URL construction for uploaded objects.

/// Builds CDN URLs of the form `{domain}/{key}`.
#[derive(Debug, Clone)]
pub struct CdnUrlBuilder {
    domain: String,
}

impl CdnUrlBuilder {
    /// Create a builder for `domain`. Trailing slashes are ignored.
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            domain: domain.trim_end_matches('/').to_string(),
        }
    }

    /// The configured domain without a trailing slash.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// URL of the object stored under `key`.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.domain, key.trim_start_matches('/'))
    }
}
