//! Prep Tracker - Application Entry Point
//!
//! Serves the problem catalog, the progress snapshot and the static frontend.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prep_tracker::{
    config::CONFIG,
    constants::{MAX_SNAPSHOT_BODY_BYTES, REQUEST_TIMEOUT_SECONDS},
    handlers,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Prep Tracker server...");

    let storage = &CONFIG.storage;
    if !storage.catalog_path.exists() {
        tracing::warn!(
            path = %storage.catalog_path.display(),
            "Catalog file not found; catalog requests will fail until it exists"
        );
    }
    tracing::info!(
        catalog = %storage.catalog_path.display(),
        progress = %storage.progress_path.display(),
        public = %storage.public_dir.display(),
        "Data locations"
    );

    // Create application state
    let state = AppState::new(CONFIG.clone());

    // Build the router
    let app = handlers::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECONDS)))
        .layer(RequestBodyLimitLayer::new(MAX_SNAPSHOT_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
