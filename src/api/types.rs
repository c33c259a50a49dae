//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::store::Task;

/// Payload for creating a task, also accepted as the full replacement
/// payload on update.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreate {
    /// Task title (required)
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Completion flag (defaults to false)
    #[serde(default)]
    pub completed: bool,
}

/// A task as returned to clients, including its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRead {
    /// Unique task identifier
    pub id: i64,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Completion flag
    pub completed: bool,
}

impl From<Task> for TaskRead {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
        }
    }
}
