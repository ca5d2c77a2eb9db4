//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::services::{CatalogSource, FileCatalogSource};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Where the catalog document comes from
    catalog: Box<dyn CatalogSource>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create state reading the catalog from the configured file
    pub fn new(config: Config) -> Self {
        let source = FileCatalogSource::new(&config.storage.catalog_path);
        Self::with_catalog_source(source, config)
    }

    pub fn with_catalog_source(source: impl CatalogSource + 'static, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog: Box::new(source),
                config,
            }),
        }
    }

    /// Get a reference to the catalog source
    pub fn catalog(&self) -> &dyn CatalogSource {
        self.inner.catalog.as_ref()
    }

    /// Path of the flat-file progress snapshot
    pub fn progress_path(&self) -> &Path {
        &self.inner.config.storage.progress_path
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
