//! Progress snapshot handler implementations

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{ProgressSnapshot, UserData},
    services::SnapshotService,
    state::AppState,
};

use super::response::SaveProgressResponse;

/// Read the snapshot, creating a default one on first access
pub async fn get_progress(State(state): State<AppState>) -> AppResult<Json<ProgressSnapshot>> {
    let snapshot = SnapshotService::load_or_init(state.progress_path()).await?;
    Ok(Json(snapshot))
}

/// Overwrite the snapshot with the posted user data
pub async fn save_progress(
    State(state): State<AppState>,
    payload: Result<Json<UserData>, JsonRejection>,
) -> AppResult<Json<SaveProgressResponse>> {
    let Json(data) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let last_updated = SnapshotService::save(state.progress_path(), data).await?;

    Ok(Json(SaveProgressResponse {
        success: true,
        message: "Progress saved successfully".to_string(),
        last_updated,
    }))
}
