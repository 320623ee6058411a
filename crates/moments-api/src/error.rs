//! API error response formatting.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use moments_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error type returned by every handler.
///
/// Wraps [`AppError`] so that the HTTP mapping lives next to the router.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        status_for(self.0.kind)
    }

    /// Public error code for the wrapped error.
    pub fn code(&self) -> &'static str {
        match self.0.kind {
            ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
                "INTERNAL_ERROR"
            }
            kind => kind.code(),
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound | ErrorKind::NotFoundOrExpired => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::AlreadyOwner => StatusCode::CONFLICT,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Internal details stay in the logs.
        let message = if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!(error = %self.0, "Internal error while handling request");
            "An internal error occurred".to_string()
        } else {
            if status == StatusCode::SERVICE_UNAVAILABLE {
                warn!(error = %self.0, "Store unavailable");
            }
            self.0.message
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
