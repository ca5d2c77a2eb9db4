//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::constants::{
    CATALOG_FILE_NAME, DEFAULT_DATA_DIR, DEFAULT_LOG_FILTER, DEFAULT_PUBLIC_DIR,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, PROGRESS_FILE_NAME,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// File locations for the catalog, the progress snapshot and static assets
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub catalog_path: PathBuf,
    pub progress_path: PathBuf,
    pub public_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            env::var("SERVER_HOST").ok(),
            env::var("SERVER_PORT").ok(),
            env::var("RUST_LOG").ok(),
        )
    }

    fn resolve(
        host: Option<String>,
        port: Option<String>,
        rust_log: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match port {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            host: host.unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            port,
            rust_log: rust_log.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let data_dir =
            PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()));
        Self::resolve(
            data_dir,
            env::var("CATALOG_FILE").ok(),
            env::var("PROGRESS_FILE").ok(),
            env::var("PUBLIC_DIR").ok(),
        )
    }

    /// Resolve file locations, defaulting unset files to the data directory
    fn resolve(
        data_dir: PathBuf,
        catalog_file: Option<String>,
        progress_file: Option<String>,
        public_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        if data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("DATA_DIR".to_string()));
        }

        Ok(Self {
            catalog_path: catalog_file
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(CATALOG_FILE_NAME)),
            progress_path: progress_file
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(PROGRESS_FILE_NAME)),
            public_dir: PathBuf::from(
                public_dir.unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string()),
            ),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
