//! Task model and request/response bodies for the task CRUD endpoints.
//!
//! Defines the [`Task`] record, the JSON bodies exchanged on
//! `/api/tasks`, and the title validation applied identically on both
//! sides of the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Errors produced by task title validation.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TitleError {
    /// Title is empty or whitespace-only.
    #[error("task title cannot be empty")]
    Empty,
    /// Title exceeds [`MAX_TITLE_LENGTH`] characters.
    #[error("task title too long (max {MAX_TITLE_LENGTH} characters)")]
    TooLong,
}

/// Validates a task title, returning the trimmed form.
///
/// Whitespace-only titles are rejected, and length is counted in
/// characters, not bytes.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for empty or whitespace-only input,
/// or [`TitleError::TooLong`] when the trimmed title exceeds
/// [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<String, TitleError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(TitleError::TooLong);
    }
    Ok(trimmed.to_string())
}

/// A to-do item in the task list.
///
/// The server is the source of truth: it assigns `id` and both
/// timestamps on creation, and refreshes `updated_at` on every
/// mutation. Timestamps serialize as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (UUID v7, time-ordered).
    pub id: TaskId,
    /// Task title. Never empty after validation.
    pub title: String,
    /// Free-form description. Defaults to empty.
    pub description: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh id and current timestamps.
    ///
    /// The title must already be validated; use [`validate_title`]
    /// before calling.
    #[must_use]
    pub fn new(title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update in place, refreshing `updated_at`.
    ///
    /// Fields absent from the request are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`TitleError`] if the request carries an invalid
    /// title; the task is not modified in that case.
    pub fn apply(&mut self, update: &UpdateTaskRequest) -> Result<(), TitleError> {
        let title = update.title.as_deref().map(validate_title).transpose()?;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the new task. Must survive [`validate_title`].
    pub title: String,
    /// Optional description; omitted means empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /api/tasks/{id}`. All fields optional (partial update).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New completion state, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Builds the partial update that flips a task's completion flag.
    #[must_use]
    pub const fn toggle(completed: bool) -> Self {
        Self {
            title: None,
            description: None,
            completed: Some(completed),
        }
    }
}

/// Body of `GET /api/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// Tasks ordered newest-first by creation time.
    pub tasks: Vec<Task>,
}
