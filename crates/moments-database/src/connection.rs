//! Connection pool for the PostgreSQL route store.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use moments_core::config::{DatabaseConfig, StoreProvider};
use moments_core::error::{AppError, ErrorKind};

/// Pooled connections to the route store.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    ///
    /// Only valid for the `postgres` provider; the memory provider never
    /// opens connections.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        if config.provider != StoreProvider::Postgres {
            return Err(AppError::configuration(format!(
                "database.provider is {:?}; no PostgreSQL pool to open",
                config.provider
            )));
        }

        let target = redact_credentials(&config.url);
        info!(
            target_url = %target,
            pool_size = %format_args!("{}..{}", config.min_connections, config.max_connections),
            acquire_timeout_s = config.connect_timeout_seconds,
            "Opening route store pool"
        );

        let pool = pool_options(config)
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    format!("Route store at {target} is unreachable: {e}"),
                    e,
                )
            })?;

        info!(target_url = %target, "Route store pool ready");
        Ok(Self { pool })
    }

    /// The sqlx pool shared by the repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drain and close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(idle = self.pool.num_idle(), "Route store pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Drop the user-info part of a connection URL so it can be logged.
pub(crate) fn redact_credentials(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let host_part = match rest[..authority_end].rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    };
    match scheme {
        Some(scheme) => format!("{scheme}://{host_part}"),
        None => host_part.to_string(),
    }
}
