//! Client-side task state.
//!
//! [`TaskStore`] owns the local reflection of the server's task
//! collection and applies the optimistic-update discipline: mutate the
//! local copy immediately, then reconcile with the server's response
//! or roll back on failure.

pub mod store;

pub use store::{StoreUpdate, TaskStore};

use taskpad_api::task::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

use crate::api::ApiError;

/// Async interface to the task endpoints.
///
/// Implemented by the HTTP client and by in-memory fakes in tests, so
/// the store's reconciliation logic can be exercised without a server.
pub trait TaskApi: Send + Sync {
    /// Fetches every task, newest-first.
    fn list_tasks(&self) -> impl std::future::Future<Output = Result<Vec<Task>, ApiError>> + Send;

    /// Creates a task and returns the server's canonical copy.
    fn create_task(
        &self,
        request: &CreateTaskRequest,
    ) -> impl std::future::Future<Output = Result<Task, ApiError>> + Send;

    /// Applies a partial update and returns the updated task.
    fn update_task(
        &self,
        id: TaskId,
        request: &UpdateTaskRequest,
    ) -> impl std::future::Future<Output = Result<Task, ApiError>> + Send;

    /// Deletes a single task.
    fn delete_task(&self, id: TaskId)
    -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Deletes every task.
    fn delete_all_tasks(&self) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
