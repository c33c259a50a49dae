//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::{create_task_store, TaskStore};

use super::types::*;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The task storage backend
    pub store: Box<dyn TaskStore>,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = create_task_store(config.store_type, config.database_path.clone()).await?;
    if !store.is_persistent() {
        tracing::warn!("Using in-memory task store; tasks are lost on restart");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the application router.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/tasks/", get(list_tasks).post(create_task))
        .route("/tasks/:task_id/", axum::routing::put(update_task).delete(delete_task))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

fn internal_error(e: crate::store::StoreError) -> (StatusCode, String) {
    tracing::error!("Store operation failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Welcome message.
async fn read_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Cloud Computing!"
    }))
}

/// Create a new task.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TaskCreate>,
) -> Result<Json<TaskRead>, (StatusCode, String)> {
    let id = state
        .store
        .insert(&req.title, req.description.as_deref(), req.completed)
        .await
        .map_err(internal_error)?;

    tracing::info!(id, "Created task");

    // Echo the payload with the assigned id; no re-read
    Ok(Json(TaskRead {
        id,
        title: req.title,
        description: req.description,
        completed: req.completed,
    }))
}

/// Retrieve all tasks.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskRead>>, (StatusCode, String)> {
    let tasks = state.store.list_all().await.map_err(internal_error)?;
    Ok(Json(tasks.into_iter().map(TaskRead::from).collect()))
}

/// Update a task by its ID.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i64>,
    Json(req): Json<TaskCreate>,
) -> Result<Json<TaskRead>, (StatusCode, String)> {
    let affected = state
        .store
        .update(task_id, &req.title, req.description.as_deref(), req.completed)
        .await
        .map_err(internal_error)?;

    if affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            format!("Task {} not found", task_id),
        ));
    }

    tracing::info!(id = task_id, "Updated task");

    // Respond with the replacement payload merged with the id; the store is
    // not re-read
    Ok(Json(TaskRead {
        id: task_id,
        title: req.title,
        description: req.description,
        completed: req.completed,
    }))
}

/// Delete a task by its ID.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let affected = state.store.delete(task_id).await.map_err(internal_error)?;

    if affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            format!("Task {} not found", task_id),
        ));
    }

    tracing::info!(id = task_id, "Deleted task");

    Ok(Json(serde_json::json!({
        "message": format!("Task {} deleted successfully", task_id)
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryTaskStore, TaskStoreType};
    use std::path::PathBuf;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            config: Config::new(PathBuf::from(":memory:"), TaskStoreType::Memory),
            store: Box::new(InMemoryTaskStore::new()),
        })
    }

    fn payload(title: &str, description: Option<&str>, completed: bool) -> TaskCreate {
        TaskCreate {
            title: title.to_string(),
            description: description.map(|s| s.to_string()),
            completed,
        }
    }

    #[tokio::test]
    async fn welcome_message() {
        let Json(body) = read_root().await;
        assert_eq!(body["message"], "Welcome to the Cloud Computing!");
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let state = test_state();

        let Json(created) = create_task(
            State(Arc::clone(&state)),
            Json(payload("write report", Some("for friday"), false)),
        )
        .await
        .expect("create failed");

        assert_eq!(created.title, "write report");
        assert_eq!(created.description.as_deref(), Some("for friday"));
        assert!(!created.completed);

        let Json(tasks) = list_tasks(State(state)).await.expect("list failed");
        assert_eq!(tasks, vec![created]);
    }

    #[tokio::test]
    async fn create_defaults_completed_to_false() {
        let state = test_state();

        let Json(created) = create_task(
            State(state),
            Json(serde_json::from_str(r#"{"title": "bare"}"#).unwrap()),
        )
        .await
        .expect("create failed");

        assert_eq!(created.title, "bare");
        assert_eq!(created.description, None);
        assert!(!created.completed);
    }

    #[tokio::test]
    async fn list_empty_store_is_ok() {
        let state = test_state();
        let Json(tasks) = list_tasks(State(state)).await.expect("list failed");
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_echoes_payload() {
        let state = test_state();

        let Json(created) = create_task(
            State(Arc::clone(&state)),
            Json(payload("A", Some("d1"), false)),
        )
        .await
        .unwrap();

        let Json(updated) = update_task(
            State(Arc::clone(&state)),
            Path(created.id),
            Json(payload("B", Some("d2"), true)),
        )
        .await
        .expect("update failed");

        assert_eq!(
            updated,
            TaskRead {
                id: created.id,
                title: "B".to_string(),
                description: Some("d2".to_string()),
                completed: true,
            }
        );

        // The store saw the same replacement
        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert_eq!(tasks, vec![updated]);
    }

    #[tokio::test]
    async fn update_missing_task_is_404() {
        let state = test_state();

        create_task(
            State(Arc::clone(&state)),
            Json(payload("keep me", None, false)),
        )
        .await
        .unwrap();

        let err = update_task(
            State(Arc::clone(&state)),
            Path(9999),
            Json(payload("B", Some("d2"), true)),
        )
        .await
        .expect_err("expected 404");
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "Task 9999 not found");

        // Existing tasks are untouched
        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "keep me");
    }

    #[tokio::test]
    async fn delete_removes_task_and_confirms() {
        let state = test_state();

        let Json(created) = create_task(
            State(Arc::clone(&state)),
            Json(payload("short lived", None, false)),
        )
        .await
        .unwrap();

        let Json(body) = delete_task(State(Arc::clone(&state)), Path(created.id))
            .await
            .expect("delete failed");
        assert_eq!(
            body["message"],
            format!("Task {} deleted successfully", created.id)
        );

        let Json(tasks) = list_tasks(State(state)).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_task_is_404() {
        let state = test_state();

        let err = delete_task(State(state), Path(9999))
            .await
            .expect_err("expected 404");
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "Task 9999 not found");
    }
}
