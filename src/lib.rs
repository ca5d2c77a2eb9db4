//! Prep Tracker - Interview Preparation Progress Tracking
//!
//! This library provides the core functionality for Prep Tracker, a personal
//! tool for working through a catalog of interview-preparation problems.
//!
//! # Features
//!
//! - Hierarchical problem catalog (category → topic → subtopic → problem)
//! - Per-problem completion and notes, persisted after every action
//! - User-added problems merged into their subtopic
//! - Completion statistics at every level of the tree
//! - Backup export/import and a portfolio summary
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers for the catalog and snapshot server
//! - **Services**: Catalog loading, aggregation and reports
//! - **Storage**: The progress store and its key-value backends
//! - **Session**: Filter/selection state and the mutate → recompute → render pipeline
//! - **Models**: Catalog, user data and report types

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::Tracker;
pub use state::AppState;
pub use storage::{ProgressStore, StoreError};
