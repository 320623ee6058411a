//! S3 presigned upload provider (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;

use moments_core::config::UploadConfig;
use moments_core::error::{AppError, ErrorKind};
use moments_core::result::AppResult;
use moments_core::traits::UploadSigner;

use crate::cdn::CdnUrlBuilder;

/// Presigns `PutObject` requests against an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3UploadSigner {
    client: Client,
    bucket: String,
    cdn: CdnUrlBuilder,
}

impl S3UploadSigner {
    /// Create a signer using the default AWS credential chain.
    pub async fn new(config: &UploadConfig) -> Self {
        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            "Initializing S3 upload signer"
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
            cdn: CdnUrlBuilder::new(config.cdn_domain.clone()),
        }
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    fn provider_name(&self) -> &str {
        "s3"
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Invalid presign duration", e)
        })?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to presign upload URL", e)
            })?;

        Ok(request.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        self.cdn.url_for(key)
    }
}
