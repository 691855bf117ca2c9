//! Optimistic task store.
//!
//! Mutations update the local list before the server responds, so the
//! UI never waits on the network. Each operation follows the same
//! shape: snapshot, apply locally, call the server, then either adopt
//! the server's canonical copy or roll back and record the error.
//!
//! Only the latest error is kept. Failed operations are not retried;
//! the user can re-issue them.

use taskpad_api::task::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};
use tokio::sync::mpsc;

use crate::api::ApiError;
use crate::tasks::TaskApi;

/// Snapshot of the store's display state, emitted on every change.
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    /// Current local task list, newest-first.
    pub tasks: Vec<Task>,
    /// Latest operation error, if any.
    pub error: Option<String>,
    /// Whether a list refresh is in flight.
    pub loading: bool,
}

/// Local reflection of the server's task collection.
pub struct TaskStore<C: TaskApi> {
    client: C,
    tasks: Vec<Task>,
    error: Option<String>,
    loading: bool,
    watcher: Option<mpsc::UnboundedSender<StoreUpdate>>,
}

impl<C: TaskApi> TaskStore<C> {
    /// Creates an empty store backed by the given API client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            tasks: Vec::new(),
            error: None,
            loading: false,
            watcher: None,
        }
    }

    /// Registers a watcher and returns the receiving end.
    ///
    /// Every state change after this call emits a [`StoreUpdate`],
    /// including the optimistic intermediate states.
    pub fn watch(&mut self) -> mpsc::UnboundedReceiver<StoreUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watcher = Some(tx);
        rx
    }

    /// Current local task list, newest-first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Latest operation error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a list refresh is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Clears the recorded error.
    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.emit();
        }
    }

    /// Replaces the local list with the server's, flagging `loading`
    /// while the request is in flight.
    ///
    /// On failure the current list is kept and the error recorded.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the list request.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        self.emit();
        let result = self.client.list_tasks().await;
        self.loading = false;
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.emit();
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Creates a task and prepends the server's copy on success.
    ///
    /// Creation is not optimistic: the id and timestamps are assigned
    /// by the server, so nothing is shown until it responds.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the create request; the list is
    /// unchanged on failure.
    pub async fn create(&mut self, title: &str, description: &str) -> Result<(), ApiError> {
        let request = CreateTaskRequest {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        };
        match self.client.create_task(&request).await {
            Ok(task) => {
                self.tasks.insert(0, task);
                self.emit();
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Applies a partial update optimistically, then reconciles.
    ///
    /// The local copy is patched immediately; on success it is
    /// replaced by the server's canonical task, on failure the
    /// snapshot is restored and the error recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the task is not in the local
    /// list, [`ApiError::Validation`] if the update carries an invalid
    /// title (nothing is sent), or the error from the server call.
    pub async fn update(&mut self, id: TaskId, update: UpdateTaskRequest) -> Result<(), ApiError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            let err = ApiError::NotFound;
            self.record_error(&err);
            return Err(err);
        };
        let snapshot = self.tasks[index].clone();
        // Task::apply validates before mutating, so the local copy is
        // untouched when the title is invalid.
        if let Err(e) = self.tasks[index].apply(&update) {
            let err = ApiError::Validation(e.to_string());
            self.record_error(&err);
            return Err(err);
        }
        self.emit();
        match self.client.update_task(id, &update).await {
            Ok(task) => {
                self.tasks[index] = task;
                self.emit();
                Ok(())
            }
            Err(e) => {
                self.tasks[index] = snapshot;
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Flips a task's completion state.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn toggle(&mut self, id: TaskId) -> Result<(), ApiError> {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            let err = ApiError::NotFound;
            self.record_error(&err);
            return Err(err);
        };
        let update = UpdateTaskRequest::toggle(!task.completed);
        self.update(id, update).await
    }

    /// Removes a task optimistically, then reconciles.
    ///
    /// A 404 from the server means the task was already gone, so the
    /// local removal stands and no error is recorded. Any other
    /// failure restores the task.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the delete request, except
    /// [`ApiError::NotFound`] which is treated as success.
    pub async fn delete(&mut self, id: TaskId) -> Result<(), ApiError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        let snapshot = self.tasks.remove(index);
        self.emit();
        match self.client.delete_task(id).await {
            Ok(()) | Err(ApiError::NotFound) => Ok(()),
            Err(e) => {
                self.tasks.insert(index, snapshot);
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Removes every task.
    ///
    /// Not optimistic: the list is cleared only after the server
    /// confirms, so a failure never wipes the local view.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the delete request.
    pub async fn delete_all(&mut self) -> Result<(), ApiError> {
        match self.client.delete_all_tasks().await {
            Ok(()) => {
                self.tasks.clear();
                self.emit();
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Records the latest error and notifies the watcher.
    fn record_error(&mut self, err: &ApiError) {
        self.error = Some(err.to_string());
        self.emit();
    }

    fn emit(&self) {
        if let Some(tx) = &self.watcher {
            let _ = tx.send(StoreUpdate {
                tasks: self.tasks.clone(),
                error: self.error.clone(),
                loading: self.loading,
            });
        }
    }
}
