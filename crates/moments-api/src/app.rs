//! Application builder: wires router, middleware, and state into an Axum
//! app and serves it.

use std::future::IntoFuture;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use moments_core::error::AppError;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = build_cors_layer(&server.cors);
    let body_limit = server.max_body_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);

    build_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Bind the configured address and serve until Ctrl+C.
///
/// In-flight requests get `shutdown_grace_seconds` to finish once the
/// signal arrives.
pub async fn run_server(state: AppState) -> Result<(), AppError> {
    let addr = state.config.server.bind_address();
    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let background = state.background.clone();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "MapMoments server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, build_app(state))
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let grace_expired = async move {
        if shutdown_rx.changed().await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
            info!(pending = background.in_flight(), "Server stopped, flushing background writes");
            background.flush().await;
        }
        _ = grace_expired => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, dropping open connections");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C; shutdown signal disabled");
            std::future::pending::<()>().await;
        }
    }
}
