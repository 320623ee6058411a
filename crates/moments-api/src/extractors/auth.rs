//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, verifies it, and injects the caller context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use moments_core::error::AppError;
use moments_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        authenticate(auth_header, state).map(AuthUser)
    }
}

/// Caller context when a bearer token is present.
///
/// A missing header yields `None`; a present but invalid token is still
/// rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

impl OptionalAuthUser {
    /// Returns the caller context, if any.
    pub fn context(&self) -> Option<&RequestContext> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(AUTHORIZATION) {
            None => Ok(OptionalAuthUser(None)),
            Some(value) => {
                let header = value
                    .to_str()
                    .map_err(|_| AppError::unauthorized("Invalid Authorization header format"))?;
                authenticate(header, state).map(|ctx| OptionalAuthUser(Some(ctx)))
            }
        }
    }
}

fn authenticate(header: &str, state: &AppState) -> Result<RequestContext, ApiError> {
    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

    let claims = state.jwt_decoder.decode_access_token(token)?;
    Ok(RequestContext::new(claims.email))
}
