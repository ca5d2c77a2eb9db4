//! Problem handler implementations

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, Problem},
    services::CatalogService,
    state::AppState,
};

/// Full catalog document
pub async fn list_problems(State(state): State<AppState>) -> AppResult<Json<Catalog>> {
    let catalog = state.catalog().fetch().await?;
    Ok(Json(catalog))
}

/// Single problem by id, searched across the whole tree
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Problem>> {
    let catalog = state.catalog().fetch().await?;

    CatalogService::find_problem(&catalog, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
}
