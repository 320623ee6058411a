//! Presigned upload abstraction.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Issues time-limited URLs that let clients upload objects directly to
/// storage, and names the public URL each object will be served from.
#[async_trait]
pub trait UploadSigner: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider name (e.g. `"s3"`).
    fn provider_name(&self) -> &str;

    /// Produce a presigned `PUT` URL for `key` valid for `ttl`.
    async fn presign_put(&self, key: &str, content_type: &str, ttl: Duration)
    -> AppResult<String>;

    /// Public (CDN) URL the object at `key` will be reachable from.
    fn public_url(&self, key: &str) -> String;
}
