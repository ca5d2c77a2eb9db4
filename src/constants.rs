//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Maximum accepted request body for progress snapshots (bytes)
pub const MAX_SNAPSHOT_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Per-request timeout in seconds
pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

// =============================================================================
// DATA FILES
// =============================================================================

/// Default directory holding the catalog and the progress snapshot
pub const DEFAULT_DATA_DIR: &str = "data";

/// Catalog document file name inside the data directory
pub const CATALOG_FILE_NAME: &str = "problems.json";

/// Progress snapshot file name inside the data directory
pub const PROGRESS_FILE_NAME: &str = "user-progress.json";

/// Default directory for static assets
pub const DEFAULT_PUBLIC_DIR: &str = "public";

// =============================================================================
// CLIENT STORAGE
// =============================================================================

/// Key under which the whole user data blob is stored
pub const STORAGE_KEY: &str = "prep_tracker";

/// Prefix of identifiers assigned to user-added problems
pub const CUSTOM_PROBLEM_ID_PREFIX: &str = "custom-";

/// Platform label used when a custom problem link names none
pub const DEFAULT_CUSTOM_PLATFORM: &str = "Custom";

/// Maximum custom problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

// =============================================================================
// REPORTING
// =============================================================================

/// Number of entries shown in the recent activity timeline
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// File name prefix of the full data backup download
pub const BACKUP_FILE_PREFIX: &str = "prep-tracker-backup";

/// File name prefix of the portfolio summary download
pub const PORTFOLIO_FILE_PREFIX: &str = "portfolio-summary";
