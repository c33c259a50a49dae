//! HTTP API for the task service.
//!
//! ## Endpoints
//!
//! - `GET /` - Welcome message
//! - `POST /tasks/` - Create a new task
//! - `GET /tasks/` - List all tasks
//! - `PUT /tasks/{task_id}/` - Replace a task by id (404 if absent)
//! - `DELETE /tasks/{task_id}/` - Delete a task by id (404 if absent)

mod routes;
pub mod types;

pub use routes::serve;
pub use types::*;
