//! Configuration management for tasklite.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `DATABASE_PATH` - Optional. Path to the SQLite database file. Defaults to `tasks.db`.
//! - `TASK_STORE` - Optional. Storage backend, `sqlite` or `memory`. Defaults to `sqlite`.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::TaskStoreType;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Which storage backend to use
    pub store_type: TaskStoreType,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("tasks.db"));

        let store_type = std::env::var("TASK_STORE")
            .map(|s| TaskStoreType::from_str(&s))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_path,
            store_type,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(database_path: PathBuf, store_type: TaskStoreType) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_path,
            store_type,
        }
    }
}
