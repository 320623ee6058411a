//! Route definitions for the MapMoments HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` router with state applied. Middleware is added by
/// [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(route_routes())
        .merge(share_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Route CRUD and uploads
fn route_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/routes",
            get(handlers::route::list_routes).post(handlers::route::create_route),
        )
        .route(
            "/routes/{id}",
            get(handlers::route::get_route)
                .put(handlers::route::update_route)
                .delete(handlers::route::delete_route),
        )
        .route("/my-routes", get(handlers::route::list_my_routes))
        .route(
            "/routes/{id}/generate-upload-urls",
            post(handlers::route::generate_upload_urls),
        )
}

/// Share tokens, share info, joining
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/routes/{id}/share",
            post(handlers::share::share_route).delete(handlers::share::revoke_share),
        )
        .route("/routes/{id}/share-info", get(handlers::share::get_share_info))
        .route("/shared-routes/{token}", get(handlers::share::get_shared_route))
        .route(
            "/shared-routes/{token}/join",
            post(handlers::share::join_shared_route),
        )
        .route("/my-shared-routes", get(handlers::share::list_my_shared_routes))
}
