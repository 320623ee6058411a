//! Route CRUD and photo upload handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use moments_core::types::RouteId;
use moments_entity::route::Route;

use crate::dto::request::{CreateRouteRequest, GenerateUploadUrlsRequest, UpdateRouteRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UploadUrlsResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, OptionalAuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/routes
pub async fn list_routes(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<Route>>>> {
    let routes = state.route_service.list_routes().await?;
    Ok(Json(ApiResponse::ok(routes)))
}

/// GET /api/routes/{id}
pub async fn get_route(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Route>>> {
    let route = state
        .route_service
        .get_route(viewer.context(), &RouteId::new(id))
        .await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// POST /api/routes
pub async fn create_route(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRouteRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Route>>)> {
    let route = state.route_service.create_route(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(route))))
}

/// PUT /api/routes/{id}
pub async fn update_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRouteRequest>,
) -> ApiResult<Json<ApiResponse<Route>>> {
    let route = state
        .route_service
        .update_route(&auth, &RouteId::new(id), req.into())
        .await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// DELETE /api/routes/{id}
pub async fn delete_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .route_service
        .delete_route(&auth, &RouteId::new(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Route deleted"))))
}

/// GET /api/my-routes
pub async fn list_my_routes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Route>>>> {
    let routes = state.route_service.list_my_routes(&auth).await?;
    Ok(Json(ApiResponse::ok(routes)))
}

/// POST /api/routes/{id}/generate-upload-urls
pub async fn generate_upload_urls(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<GenerateUploadUrlsRequest>,
) -> ApiResult<Json<ApiResponse<UploadUrlsResponse>>> {
    let urls = state
        .upload_service
        .generate_upload_urls(&auth, &RouteId::new(id), &req.filenames, &req.content_types)
        .await?;
    Ok(Json(ApiResponse::ok(UploadUrlsResponse { urls })))
}
