//! Route sharing handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};

use moments_core::types::RouteId;
use moments_entity::route::Route;
use moments_service::share::{MintedToken, ShareInfo};

use crate::dto::request::ShareRouteRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::extractors::json::parse_optional_body;
use crate::state::AppState;

/// POST /api/routes/{id}/share
///
/// Mints a fresh token, replacing any previous one. The body is optional.
pub async fn share_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<MintedToken>>> {
    let req: ShareRouteRequest = parse_optional_body(&body)?;
    let minted = state
        .share_service
        .share(&auth, &RouteId::new(id), req.expiry_hours)
        .await?;
    Ok(Json(ApiResponse::ok(minted)))
}

/// GET /api/routes/{id}/share-info
pub async fn get_share_info(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ShareInfo>>> {
    let info = state
        .share_service
        .get_share_info(&auth, &RouteId::new(id))
        .await?;
    Ok(Json(ApiResponse::ok(info)))
}

/// DELETE /api/routes/{id}/share
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .share_service
        .revoke_share(&auth, &RouteId::new(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Sharing revoked"))))
}

/// GET /api/shared-routes/{token}
pub async fn get_shared_route(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<ApiResponse<Route>>> {
    let route = state.share_service.get_by_token(&token).await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// POST /api/shared-routes/{token}/join
pub async fn join_shared_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token): Path<String>,
) -> ApiResult<Json<ApiResponse<Route>>> {
    let route = state.share_service.join(&auth, &token).await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// GET /api/my-shared-routes
pub async fn list_my_shared_routes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Route>>>> {
    let routes = state.share_service.list_shared_for_user(&auth).await?;
    Ok(Json(ApiResponse::ok(routes)))
}
