//! In-memory task store (non-persistent).

use super::{StoreError, Task, TaskStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Inner {
    next_id: i64,
    tasks: Vec<Task>,
}

#[derive(Clone)]
pub struct InMemoryTaskStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                next_id: 1,
                tasks: Vec::new(),
            })),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn is_persistent(&self) -> bool {
        false
    }

    async fn insert(
        &self,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        // The counter only ever moves forward, so ids are never reissued
        let id = inner.next_id;
        inner.next_id += 1;
        inner.tasks.push(Task {
            id,
            title: title.to_string(),
            description: description.map(|s| s.to_string()),
            completed,
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.inner.read().await.tasks.clone())
    }

    async fn update(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.title = title.to_string();
                task.description = description.map(|s| s.to_string());
                task.completed = completed;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        Ok(before - inner.tasks.len())
    }
}
