//! MapMoments Server: route sharing and collaboration backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use moments_api::{AppState, run_server};
use moments_core::config::{AppConfig, StoreProvider};
use moments_core::error::AppError;
use moments_core::types::SystemClock;
use moments_database::{
    DatabasePool, MemoryStore, PgRouteRepository, PgUserRepository, RouteStore, UserStore,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("MAPMOMENTS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MapMoments v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores ───────────────────────────────────────────
    let (routes, users, pool): (Arc<dyn RouteStore>, Arc<dyn UserStore>, Option<DatabasePool>) =
        match config.database.provider {
            StoreProvider::Postgres => {
                tracing::info!("Connecting to database...");
                let pool = DatabasePool::connect(&config.database).await?;

                if config.database.run_migrations {
                    moments_database::migration::run_migrations(pool.pool()).await?;
                }

                let routes: Arc<dyn RouteStore> =
                    Arc::new(PgRouteRepository::new(pool.pool().clone()));
                let users: Arc<dyn UserStore> =
                    Arc::new(PgUserRepository::new(pool.pool().clone()));
                (routes, users, Some(pool))
            }
            StoreProvider::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on restart");
                let store = MemoryStore::new();
                let routes: Arc<dyn RouteStore> = Arc::new(store.clone());
                let users: Arc<dyn UserStore> = Arc::new(store);
                (routes, users, None)
            }
        };

    // ── Step 2: Upload signer ────────────────────────────────────
    tracing::info!(provider = %config.uploads.provider, "Initializing upload signer...");
    let signer = moments_storage::build_upload_signer(&config.uploads).await?;

    // ── Step 3: Services and HTTP server ─────────────────────────
    let state = AppState::new(config, routes, users, signer, Arc::new(SystemClock));
    let result = run_server(state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }

    result
}
