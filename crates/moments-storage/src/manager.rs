//! Upload signer selection.

use std::sync::Arc;

use tracing::info;

use moments_core::config::UploadConfig;
use moments_core::error::AppError;
use moments_core::result::AppResult;
use moments_core::traits::UploadSigner;

use crate::cdn::CdnUrlBuilder;
use crate::providers::DirectUploadSigner;

/// Build the signer named by `uploads.provider`.
pub async fn build_upload_signer(config: &UploadConfig) -> AppResult<Arc<dyn UploadSigner>> {
    let signer: Arc<dyn UploadSigner> = match config.provider.as_str() {
        #[cfg(feature = "s3")]
        "s3" => Arc::new(crate::providers::S3UploadSigner::new(config).await),
        "direct" => {
            info!(endpoint = %config.direct_endpoint, "Initializing direct upload signer");
            Arc::new(DirectUploadSigner::new(
                config.direct_endpoint.clone(),
                CdnUrlBuilder::new(config.cdn_domain.clone()),
            ))
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown upload provider: '{other}'. Supported: s3, direct"
            )));
        }
    };
    Ok(signer)
}
