//! HTTP surface: router, handlers, CORS, and error mapping.
//!
//! Handlers are thin wrappers over the [`TaskStore`]; every error
//! funnels through [`ApiError`] so the client always receives a JSON
//! `{"error": "..."}` body with a meaningful status code.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use taskpad_api::error::ErrorBody;
use taskpad_api::greeting::{HealthResponse, HelloResponse};
use taskpad_api::task::{CreateTaskRequest, Task, TaskId, TaskListResponse, UpdateTaskRequest};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::store::{StoreError, TaskStore};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "taskpad-server";

/// Greeting returned by `/api/hello`.
const HELLO_MESSAGE: &str = "Hello from the Taskpad backend!";

/// Shared server state holding the task store.
#[derive(Default)]
pub struct AppState {
    /// The in-memory task collection.
    pub store: TaskStore,
}

impl AppState {
    /// Creates a fresh state with an empty task store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: TaskStore::new(),
        }
    }
}

/// Error type returned by the task handlers.
///
/// Maps onto HTTP status codes in [`IntoResponse`]: invalid titles are
/// 422, missing tasks are 404.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request carried an invalid task title.
    #[error(transparent)]
    InvalidTitle(#[from] taskpad_api::task::TitleError),
    /// The addressed task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidTitle(e) => Self::InvalidTitle(e),
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidTitle(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Builds the application router with all routes and the CORS layer.
pub fn router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/hello", get(hello))
        .route("/health", get(health))
        .route(
            "/api/tasks",
            get(list_tasks).post(create_task).delete(delete_all_tasks),
        )
        .route(
            "/api/tasks/{id}",
            axum::routing::put(update_task).delete(delete_task),
        )
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Builds the CORS layer from the configured origins.
///
/// An empty origin list falls back to a permissive layer (dev mode).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse::new(HELLO_MESSAGE))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::new(SERVICE_NAME))
}

async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<TaskListResponse> {
    let tasks = state.store.list().await;
    Json(TaskListResponse { tasks })
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state
        .store
        .create(&payload.title, payload.description)
        .await?;
    tracing::info!(id = %task.id, title = %task.title, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    Path(id): Path<TaskId>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state.store.update(id, &payload).await?;
    tracing::debug!(id = %id, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    Path(id): Path<TaskId>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(id).await {
        tracing::debug!(id = %id, "task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

async fn delete_all_tasks(State(state): State<Arc<AppState>>) -> StatusCode {
    let removed = state.store.clear().await;
    tracing::info!(removed = removed, "task list cleared");
    StatusCode::NO_CONTENT
}

/// Starts the server on the given address and returns the bound
/// address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test
/// code; bind to port 0 for an OS-assigned port.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given
/// address.
pub async fn start_server(
    addr: &str,
    state: Arc<AppState>,
    allowed_origins: &[String],
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state, allowed_origins);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}

/// Starts the server in-process for testing.
///
/// Binds to `127.0.0.1:0` (OS-assigned port) with permissive CORS and
/// returns the bound address and a [`tokio::task::JoinHandle`] for
/// cleanup.
#[cfg(test)]
#[allow(clippy::expect_used)]
async fn start_test_server() -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    start_server("127.0.0.1:0", Arc::new(AppState::new()), &[])
        .await
        .expect("failed to start test server")
}
