//! Response bodies for the hello and health endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/hello`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloResponse {
    /// Greeting message.
    pub message: String,
    /// When the response was generated.
    pub timestamp: DateTime<Utc>,
    /// Always `"success"`.
    pub status: String,
}

impl HelloResponse {
    /// Builds a greeting response with the current timestamp.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            status: "success".to_string(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the service is up.
    pub status: String,
    /// When the response was generated.
    pub timestamp: DateTime<Utc>,
    /// Name of the responding service.
    pub service: String,
}

impl HealthResponse {
    /// Builds a health response for the named service.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            service: service.into(),
        }
    }
}
