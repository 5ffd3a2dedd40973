use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Maximum number of body bytes kept in error messages
const MAX_SNIPPET_BYTES: usize = 400;

/// Errors that can occur when using the Parallel API client
#[derive(Debug, Error)]
pub enum ParallelError {
    /// HTTP transport error (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success response returned by the API
    #[error("API error ({}): {}", .0.status_label(), .0.message)]
    Api(ApiErrorObject),

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Response body could not be decoded
    #[error("Malformed response: {0}")]
    Serde(String),
}

/// Error details decoded from a non-success API response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorObject {
    /// HTTP status code
    pub status_code: Option<u16>,
    /// Human-readable error message
    pub message: String,
    /// Error type string, when the API provides one
    pub error_type: Option<String>,
}

impl ApiErrorObject {
    fn status_label(&self) -> String {
        self.status_code
            .map_or_else(|| "unknown status".to_string(), |c| c.to_string())
    }
}

impl ParallelError {
    /// Returns the HTTP status code for API errors
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => obj.status_code,
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::Serde(_) => None,
        }
    }

    /// True when the credential is missing or was rejected by the API
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Config(_) => true,
            _ => matches!(self.status_code(), Some(401 | 403)),
        }
    }

    /// Determines if this error is retryable
    ///
    /// Retryable errors include rate limits (429), timeouts (408),
    /// conflicts (409), server errors (5xx), and transport timeouts.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(obj) => obj
                .status_code
                .is_some_and(crate::retry::is_retryable_status),
            Self::Reqwest(e) => e.is_timeout() || e.is_connect(),
            Self::Config(_) | Self::Serde(_) => false,
        }
    }
}

fn snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(&body[..body.len().min(MAX_SNIPPET_BYTES)]).into_owned()
}

/// Maps a serde deserialization error to a `ParallelError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> ParallelError {
    ParallelError::Serde(format!("{e}: {}", snippet(body)))
}

/// Pulls a message out of the error shapes the API is known to return:
/// `{"error": {"message", "type"}}`, `{"message"}` and `{"detail"}`.
fn message_from_json(v: &Value) -> Option<(String, Option<String>)> {
    let as_string = |v: &Value| v.as_str().map(str::to_string);

    if let Some(err) = v.get("error") {
        if let Some(msg) = err.get("message").and_then(as_string) {
            let kind = err.get("type").and_then(as_string);
            return Some((msg, kind));
        }
        if let Some(msg) = as_string(err) {
            return Some((msg, None));
        }
    }
    if let Some(msg) = v.get("message").and_then(as_string) {
        return Some((msg, v.get("type").and_then(as_string)));
    }
    match v.get("detail") {
        Some(Value::String(s)) => Some((s.clone(), None)),
        Some(other @ (Value::Array(_) | Value::Object(_))) => Some((other.to_string(), None)),
        _ => None,
    }
}

/// Deserializes an API error from the response body
///
/// Attempts to parse the error as JSON, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> ParallelError {
    let status_code = Some(status.as_u16());

    if let Some((message, error_type)) = serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(message_from_json)
    {
        return ParallelError::Api(ApiErrorObject {
            status_code,
            message,
            error_type,
        });
    }

    // Server may return plain text on 5xx; cap body to avoid log/memory bloat
    ParallelError::Api(ApiErrorObject {
        status_code,
        message: snippet(body),
        error_type: Some(format!("http_{}", status.as_u16())),
    })
}
