//! Error types for the insight provider.

use thiserror::Error;

/// Errors that can occur while requesting insights.
///
/// None of these reach callers of the gateway; they are logged and turned
/// into an empty result.
#[derive(Debug, Error)]
pub enum InsightError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the provider, or the raw body.
        message: String,
    },

    /// The reply did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The reply carried no text.
    #[error("empty response")]
    EmptyResponse,

    /// The provider did not answer in time.
    #[error("timed out after {0} seconds")]
    Timeout(u64),
}

/// Error body returned by the Gemini API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Numeric status, mirrors the HTTP status.
    #[serde(default)]
    pub code: u16,
    /// Error message.
    pub message: String,
    /// Canonical status name, e.g. `"INVALID_ARGUMENT"`.
    #[serde(default)]
    pub status: String,
}
