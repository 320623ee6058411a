//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files plus environment variables. Each sub-module represents a
//! logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod sharing;
pub mod uploads;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::sharing::SharingConfig;
pub use self::uploads::UploadConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`MAPMOMENTS__SERVER__PORT=9000`).
const ENV_PREFIX: &str = "MAPMOMENTS";

/// Root application configuration.
///
/// Top-level deserialization target for `config/default.toml`, the
/// environment overlay `config/{env}.toml`, and `MAPMOMENTS__*` variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token verification settings.
    pub auth: AuthConfig,
    /// Route sharing settings.
    #[serde(default)]
    pub sharing: SharingConfig,
    /// Photo upload settings.
    #[serde(default)]
    pub uploads: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml`, and environment
    /// variables prefixed with `MAPMOMENTS`. Both files are optional.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", &format!("config/{env}"))
    }

    /// Load configuration from explicit base and overlay file stems.
    pub fn load_from(base: &str, overlay: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(overlay).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject configurations that would start a misbehaving server.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.database.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }
        if self.sharing.store_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "sharing.store_timeout_seconds must be greater than zero",
            ));
        }
        if self.uploads.max_files_per_request == 0 {
            return Err(AppError::configuration(
                "uploads.max_files_per_request must be greater than zero",
            ));
        }
        Ok(())
    }
}
