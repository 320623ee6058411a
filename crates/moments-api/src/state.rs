//! Application state shared across all handlers via Axum's `State` extractor.

use std::sync::Arc;
use std::time::Instant;

use moments_auth::JwtDecoder;
use moments_core::config::AppConfig;
use moments_core::traits::UploadSigner;
use moments_core::types::Clock;
use moments_database::{RouteStore, UserStore};
use moments_service::{
    BackgroundWrites, CollaboratorAdmission, PermissionResolver, PhotoUploadService, RouteService, ShareService,
    ShareTokenManager, StoreDeadline,
};

/// Shared application state.
///
/// Cloned into each handler; every field is an `Arc` so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Verifies bearer tokens.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Route store, used directly only by the health check.
    pub routes: Arc<dyn RouteStore>,
    /// Per-call store deadline.
    pub deadline: StoreDeadline,
    /// Best-effort share-grant writes still running.
    pub background: BackgroundWrites,
    /// Route CRUD.
    pub route_service: Arc<RouteService>,
    /// Presigned photo uploads.
    pub upload_service: Arc<PhotoUploadService>,
    /// Sharing and collaborator admission.
    pub share_service: Arc<ShareService>,
    /// When the process started serving.
    pub started_at: Instant,
}

impl AppState {
    /// Wire the service graph on top of the given stores, signer, and clock.
    pub fn new(
        config: AppConfig,
        routes: Arc<dyn RouteStore>,
        users: Arc<dyn UserStore>,
        signer: Arc<dyn UploadSigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let deadline = StoreDeadline::from_config(&config.sharing);
        let background = BackgroundWrites::new(deadline);
        let permissions = PermissionResolver::new(Arc::clone(&routes), deadline);

        let tokens = ShareTokenManager::new(
            Arc::clone(&routes),
            permissions.clone(),
            Arc::clone(&clock),
            background.clone(),
            &config.sharing,
        );
        let admission = CollaboratorAdmission::new(
            Arc::clone(&routes),
            tokens.clone(),
            Arc::clone(&clock),
            deadline,
            background.clone(),
        );
        let share_service = ShareService::new(
            Arc::clone(&routes),
            users,
            permissions.clone(),
            tokens,
            admission,
            deadline,
        );
        let route_service = RouteService::new(
            Arc::clone(&routes),
            permissions.clone(),
            Arc::clone(&clock),
            deadline,
            background.clone(),
            config.uploads.cdn_domain.clone(),
        );
        let upload_service = PhotoUploadService::new(
            Arc::clone(&routes),
            permissions,
            signer,
            clock,
            deadline,
            &config.uploads,
        );

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            routes,
            deadline,
            background,
            route_service: Arc::new(route_service),
            upload_service: Arc::new(upload_service),
            share_service: Arc::new(share_service),
            started_at: Instant::now(),
        }
    }
}
