//! SQLite-based task store.
//!
//! Only the database path is held between calls. Each operation opens its
//! own connection inside a blocking task and releases it before returning,
//! so no connection outlives the request it serves. Single-statement
//! atomicity is delegated to SQLite.

use super::{StoreError, Task, TaskStore};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::PathBuf;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT 0
);
"#;

pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Open the database at `db_path`, creating the tasks table if absent.
    pub async fn new(db_path: PathBuf) -> Result<Self, StoreError> {
        let path = db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            conn.execute_batch(SCHEMA)?;
            Ok::<_, StoreError>(())
        })
        .await??;

        Ok(Self { db_path })
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    fn is_persistent(&self) -> bool {
        true
    }

    async fn insert(
        &self,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<i64, StoreError> {
        let path = self.db_path.clone();
        let title = title.to_string();
        let description = description.map(|s| s.to_string());

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            conn.execute(
                "INSERT INTO tasks (title, description, completed) VALUES (?1, ?2, ?3)",
                params![title, description, completed],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await?
    }

    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let path = self.db_path.clone();

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            let mut stmt =
                conn.prepare("SELECT id, title, description, completed FROM tasks ORDER BY id")?;

            let tasks = stmt
                .query_map([], |row| {
                    Ok(Task {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        completed: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(tasks)
        })
        .await?
    }

    async fn update(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<usize, StoreError> {
        let path = self.db_path.clone();
        let title = title.to_string();
        let description = description.map(|s| s.to_string());

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            let affected = conn.execute(
                "UPDATE tasks SET title = ?1, description = ?2, completed = ?3 WHERE id = ?4",
                params![title, description, completed, id],
            )?;
            Ok(affected)
        })
        .await?
    }

    async fn delete(&self, id: i64) -> Result<usize, StoreError> {
        let path = self.db_path.clone();

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            let affected = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(affected)
        })
        .await?
    }
}
