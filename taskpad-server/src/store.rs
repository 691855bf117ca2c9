//! In-memory task store shared across HTTP handlers.
//!
//! The [`TaskStore`] is the single source of truth for the task
//! collection. Clients hold transient optimistically-mutated copies
//! that reconcile against the state held here.

use std::collections::HashMap;

use taskpad_api::task::{Task, TaskId, TitleError, UpdateTaskRequest, validate_title};
use tokio::sync::RwLock;

/// Errors produced by store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The supplied title failed validation.
    #[error(transparent)]
    InvalidTitle(#[from] TitleError),
    /// No task exists with the given id.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// In-memory task collection keyed by [`TaskId`].
///
/// Thread-safe via [`RwLock`]. Listing sorts newest-first by creation
/// time; ids are time-ordered UUID v7 so the id breaks ties between
/// tasks created within the same timestamp tick.
pub struct TaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates a new, empty task store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a task from a title and optional description.
    ///
    /// Assigns the id and both timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTitle`] if the title is empty,
    /// whitespace-only, or too long.
    pub async fn create(
        &self,
        title: &str,
        description: Option<String>,
    ) -> Result<Task, StoreError> {
        let title = validate_title(title)?;
        let task = Task::new(title, description.unwrap_or_default());
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    /// Returns all tasks, newest-first by creation time.
    pub async fn list(&self) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        let mut list: Vec<Task> = tasks.values().cloned().collect();
        list.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        list
    }

    /// Applies a partial update to a task, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no task has the given id,
    /// or [`StoreError::InvalidTitle`] if the request carries an
    /// invalid title (the task is left unmodified).
    pub async fn update(&self, id: TaskId, update: &UpdateTaskRequest) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        task.apply(update)?;
        Ok(task.clone())
    }

    /// Removes a task, returning whether it existed.
    pub async fn delete(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.write().await;
        tasks.remove(&id).is_some()
    }

    /// Removes every task, returning how many were removed.
    ///
    /// Clearing an already-empty store is a no-op.
    pub async fn clear(&self) -> usize {
        let mut tasks = self.tasks.write().await;
        let removed = tasks.len();
        tasks.clear();
        removed
    }

    /// Returns the number of stored tasks.
    pub async fn len(&self) -> usize {
        let tasks = self.tasks.read().await;
        tasks.len()
    }

    /// Returns whether the store holds no tasks.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
