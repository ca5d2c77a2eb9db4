//! Liveness endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// False while the catalog file is missing; catalog routes answer 500 until it appears
    pub catalog_present: bool,
    pub snapshot_present: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = &state.config().storage;
    let catalog_present = tokio::fs::try_exists(&storage.catalog_path)
        .await
        .unwrap_or(false);
    let snapshot_present = tokio::fs::try_exists(&storage.progress_path)
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: if catalog_present { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        catalog_present,
        snapshot_present,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
