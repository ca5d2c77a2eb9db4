//! Business logic services

pub mod aggregator;
pub mod catalog_service;
pub mod report_service;
pub mod snapshot_service;

pub use catalog_service::{CatalogError, CatalogService, CatalogSource, FileCatalogSource};
pub use report_service::ReportService;
pub use snapshot_service::SnapshotService;
