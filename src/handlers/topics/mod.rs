//! Topics tree handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Topics routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::topics_tree))
}
