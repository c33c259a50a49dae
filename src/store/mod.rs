//! Task storage module with pluggable backends.
//!
//! Supports:
//! - `memory`: In-memory storage (non-persistent, for testing)
//! - `sqlite`: SQLite database, one table, one connection per operation

mod memory;
mod sqlite;

pub use memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, immutable and never reused
    pub id: i64,

    /// Task title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Whether the task is done
    pub completed: bool,
}

/// Task store trait - implemented by all storage backends.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Whether this store persists data across restarts.
    fn is_persistent(&self) -> bool;

    /// Insert a new task, returning its freshly assigned id.
    async fn insert(
        &self,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<i64, StoreError>;

    /// List every stored task in insertion order. An empty store yields an
    /// empty vec, never an error.
    async fn list_all(&self) -> Result<Vec<Task>, StoreError>;

    /// Replace all fields of the task matching `id`. Returns the number of
    /// affected rows: 0 when no record matches, 1 otherwise.
    async fn update(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<usize, StoreError>;

    /// Permanently remove the task matching `id`. Same affected-count
    /// contract as `update`.
    async fn delete(&self, id: i64) -> Result<usize, StoreError>;
}

/// Task store type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStoreType {
    Memory,
    #[default]
    Sqlite,
}

impl TaskStoreType {
    /// Parse from environment variable value.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" => Self::Memory,
            "sqlite" | "db" => Self::Sqlite,
            _ => Self::default(),
        }
    }
}

/// Create a task store based on type and configuration.
pub async fn create_task_store(
    store_type: TaskStoreType,
    database_path: PathBuf,
) -> Result<Box<dyn TaskStore>, StoreError> {
    match store_type {
        TaskStoreType::Memory => Ok(Box::new(InMemoryTaskStore::new())),
        TaskStoreType::Sqlite => {
            let store = SqliteTaskStore::new(database_path).await?;
            Ok(Box::new(store))
        }
    }
}
