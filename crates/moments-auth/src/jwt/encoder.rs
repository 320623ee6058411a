//! JWT token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use moments_core::config::AuthConfig;
use moments_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Creates signed access tokens in the account service's format.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes,
        }
    }

    /// Mint an access token with the configured lifetime.
    pub fn encode_access_token(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<String, AppError> {
        self.encode_with_expiry(email, first_name, last_name, self.access_ttl_minutes * 60)
    }

    /// Mint an access token expiring `ttl_seconds` from now. Negative values
    /// produce an already expired token.
    pub fn encode_with_expiry(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        ttl_seconds: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            uid: uuid::Uuid::new_v4().simple().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign access token", e)
        })
    }
}
