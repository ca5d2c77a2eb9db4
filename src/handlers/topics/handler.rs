//! Topics handler implementations

use axum::{extract::State, Json};

use crate::{error::AppResult, services::CatalogService, state::AppState};

use super::response::CategoryNode;

/// Catalog pruned to ids, names and problem counts for navigation
pub async fn topics_tree(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryNode>>> {
    let catalog = state.catalog().fetch().await?;
    Ok(Json(CatalogService::topics_tree(&catalog)))
}
