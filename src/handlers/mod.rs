//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod health;
pub mod problems;
pub mod progress;
pub mod topics;

use axum::{middleware, Router};
use tower_http::services::ServeDir;

use crate::{middleware::logging_middleware, state::AppState};

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/problems", problems::routes())
        .nest("/topics", topics::routes())
        .nest("/progress", progress::routes())
}

/// Full application router: the API under `/api`, static assets elsewhere
pub fn app(state: AppState) -> Router {
    // Directory requests, including `/`, resolve to their index.html
    let static_files = ServeDir::new(&state.config().storage.public_dir);

    Router::new()
        .nest("/api", routes())
        .fallback_service(static_files)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
