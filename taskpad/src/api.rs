//! Typed HTTP client for the Taskpad backend.
//!
//! One method per endpoint, each returning a parsed body or an
//! [`ApiError`] classifying the failure. The hello fetch carries its
//! own fixed timeout so a stalled request surfaces as a
//! distinguishable "request timed out" error.

use std::time::Duration;

use serde::de::DeserializeOwned;
use taskpad_api::error::ErrorBody;
use taskpad_api::greeting::{HealthResponse, HelloResponse};
use taskpad_api::task::{CreateTaskRequest, Task, TaskId, TaskListResponse, UpdateTaskRequest};

use crate::tasks::TaskApi;

/// Default timeout for regular task operations.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for the hello fetch.
pub const DEFAULT_HELLO_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors returned by API operations.
///
/// The display strings are shown verbatim in the UI, so each variant
/// renders as the message the user should read.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected the request body (400/422).
    #[error("{0}")]
    Validation(String),
    /// The addressed resource does not exist (404).
    #[error("task not found")]
    NotFound,
    /// Any other non-2xx response.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// The request could not be sent or the connection dropped.
    #[error("failed to connect: {0}")]
    Transport(String),
    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,
    /// The response body was not the expected JSON.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// HTTP client bound to a single Taskpad server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    hello_timeout: Duration,
}

impl ApiClient {
    /// Creates a client for the given base URL (no trailing slash).
    ///
    /// `request_timeout` applies to every task operation;
    /// `hello_timeout` only to the hello fetch.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        hello_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            hello_timeout,
        })
    }

    /// Fetches the greeting from `/api/hello`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Timeout`] when the request exceeds the
    /// hello timeout, or any other [`ApiError`] classification.
    pub async fn hello(&self) -> Result<HelloResponse, ApiError> {
        let response = self
            .http
            .get(self.url("/api/hello"))
            .timeout(self.hello_timeout)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Fetches the service health from `/health`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.http.get(self.url("/health")).send().await?;
        parse_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl TaskApi for ApiClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.http.get(self.url("/api/tasks")).send().await?;
        let body: TaskListResponse = parse_response(response).await?;
        Ok(body.tasks)
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.url("/api/tasks"))
            .json(request)
            .send()
            .await?;
        parse_response(response).await
    }

    async fn update_task(&self, id: TaskId, request: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/api/tasks/{id}")))
            .json(request)
            .send()
            .await?;
        parse_response(response).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await?;
        expect_no_content(response).await
    }

    async fn delete_all_tasks(&self) -> Result<(), ApiError> {
        let response = self.http.delete(self.url("/api/tasks")).send().await?;
        expect_no_content(response).await
    }
}

/// Parses a 2xx JSON response, or classifies the error status.
async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        Err(error_for_status(status, response).await)
    }
}

/// Accepts a bodyless success response (204).
async fn expect_no_content(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(error_for_status(status, response).await)
    }
}

/// Maps a non-2xx response onto the [`ApiError`] taxonomy.
///
/// Validation errors carry the server's `{"error": "..."}` message so
/// the UI can surface it inline.
async fn error_for_status(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
    match status.as_u16() {
        404 => ApiError::NotFound,
        400 | 422 => match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::Validation(body.error),
            Err(_) => ApiError::Validation("invalid request".to_string()),
        },
        code => ApiError::Status(code),
    }
}
