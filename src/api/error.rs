//! Error types for the course service client

use thiserror::Error;

/// Errors that can occur when talking to the course service
#[derive(Debug, Error)]
pub enum CourseApiError {
    /// HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Configured base URL cannot carry a request path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body had an unexpected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CourseApiError {
    /// Check if the tokens were rejected
    pub fn requires_reauth(&self) -> bool {
        matches!(self, CourseApiError::ApiError { status: 401, .. })
    }

    /// Check if the course is not accessible to this user
    pub fn is_access_denied(&self) -> bool {
        matches!(self, CourseApiError::ApiError { status: 401 | 403 | 404, .. })
    }
}
