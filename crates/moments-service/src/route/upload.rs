//! Presigned photo upload URLs.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use moments_core::config::UploadConfig;
use moments_core::error::AppError;
use moments_core::traits::UploadSigner;
use moments_core::types::{Clock, RouteId};
use moments_database::RouteStore;
use moments_entity::route::Photo;

use crate::context::RequestContext;
use crate::deadline::StoreDeadline;
use crate::permission::PermissionResolver;

/// One presigned upload slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrl {
    /// Sanitized file name.
    pub filename: String,
    /// Presigned `PUT` URL.
    pub url: String,
    /// Public URL the photo will be served from.
    pub cloudfront_url: String,
}

/// Issues upload URLs to owners and upload collaborators and records the
/// resulting photos on the route.
#[derive(Debug, Clone)]
pub struct PhotoUploadService {
    routes: Arc<dyn RouteStore>,
    permissions: PermissionResolver,
    signer: Arc<dyn UploadSigner>,
    clock: Arc<dyn Clock>,
    deadline: StoreDeadline,
    url_ttl: Duration,
    max_files: usize,
}

impl PhotoUploadService {
    /// Creates a new upload service.
    pub fn new(
        routes: Arc<dyn RouteStore>,
        permissions: PermissionResolver,
        signer: Arc<dyn UploadSigner>,
        clock: Arc<dyn Clock>,
        deadline: StoreDeadline,
        config: &UploadConfig,
    ) -> Self {
        Self {
            routes,
            permissions,
            signer,
            clock,
            deadline,
            url_ttl: Duration::from_secs(config.url_ttl_seconds),
            max_files: config.max_files_per_request,
        }
    }

    /// Presign one upload per file and append the photos to the route.
    pub async fn generate_upload_urls(
        &self,
        ctx: &RequestContext,
        route_id: &RouteId,
        filenames: &[String],
        content_types: &[String],
    ) -> Result<Vec<UploadUrl>, AppError> {
        self.permissions.require_upload(&ctx.user_id, route_id).await?;

        if filenames.is_empty() || filenames.len() > self.max_files {
            return Err(AppError::invalid_input(format!(
                "Must provide 1-{} filenames",
                self.max_files
            )));
        }
        if content_types.len() != filenames.len() {
            return Err(AppError::invalid_input(
                "contentTypes length must match filenames length",
            ));
        }

        let mut urls = Vec::with_capacity(filenames.len());
        for (raw, content_type) in filenames.iter().zip(content_types) {
            let filename = sanitize_filename(raw)?;
            let key = format!("{route_id}/{filename}");
            let url = self
                .signer
                .presign_put(&key, content_type, self.url_ttl)
                .await?;
            urls.push(UploadUrl {
                cloudfront_url: self.signer.public_url(&key),
                filename,
                url,
            });
        }

        let photos: Vec<Photo> = urls
            .iter()
            .map(|u| Photo {
                filename: u.filename.clone(),
                cloudfront_url: u.cloudfront_url.clone(),
            })
            .collect();
        let now = self.clock.now().timestamp_millis();
        self.deadline
            .run(
                "append_photos",
                self.routes.append_photos(route_id, &photos, now),
            )
            .await?
            .ok_or_else(|| AppError::not_found(format!("Route '{route_id}' not found")))?;

        info!(
            route_id = %route_id,
            user_id = %ctx.user_id,
            count = urls.len(),
            provider = self.signer.provider_name(),
            "Upload URLs issued"
        );
        Ok(urls)
    }
}

/// Strip parent-directory sequences and leading slashes from a client
/// supplied file name.
fn sanitize_filename(raw: &str) -> Result<String, AppError> {
    let cleaned = raw.replace("..", "");
    let cleaned = cleaned.trim().trim_start_matches('/');
    if cleaned.is_empty() {
        return Err(AppError::invalid_input(format!("Invalid filename '{raw}'")));
    }
    Ok(cleaned.to_string())
}
