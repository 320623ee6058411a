//! JSON body extractors that report failures as `INVALID_INPUT`.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use moments_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that has been deserialized and validated.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        validate(&value)?;
        Ok(Self(value))
    }
}

/// Parse an optional JSON body. An empty body yields `T::default()`.
pub fn parse_optional_body<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: T = serde_json::from_slice(bytes)
        .map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;
    validate(&value)?;
    Ok(value)
}

fn validate<T: Validate>(value: &T) -> Result<(), ApiError> {
    value
        .validate()
        .map_err(|e| ApiError::from(AppError::invalid_input(format!("Validation failed: {e}"))))
}
