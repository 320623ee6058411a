//! Unsigned upload URLs for local development.

use std::time::Duration;

use async_trait::async_trait;

use moments_core::result::AppResult;
use moments_core::traits::UploadSigner;

use crate::cdn::CdnUrlBuilder;

/// Returns the object's upload endpoint without a signature. Suitable for
/// a local object store that accepts anonymous writes, and for tests.
#[derive(Debug, Clone)]
pub struct DirectUploadSigner {
    endpoint: String,
    cdn: CdnUrlBuilder,
}

impl DirectUploadSigner {
    /// Create a signer that uploads to `endpoint` and serves from `cdn`.
    pub fn new(endpoint: impl Into<String>, cdn: CdnUrlBuilder) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            cdn,
        }
    }
}

#[async_trait]
impl UploadSigner for DirectUploadSigner {
    fn provider_name(&self) -> &str {
        "direct"
    }

    async fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        ttl: Duration,
    ) -> AppResult<String> {
        Ok(format!("{}/{}?expires={}", self.endpoint, key, ttl.as_secs()))
    }

    fn public_url(&self, key: &str) -> String {
        self.cdn.url_for(key)
    }
}
