//! Progress response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Acknowledgement of a snapshot write
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressResponse {
    pub success: bool,
    pub message: String,
    pub last_updated: DateTime<Utc>,
}
