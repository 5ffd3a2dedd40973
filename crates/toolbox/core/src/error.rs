//! Unified error type for tools.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Error type returned by tool operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Invalid input provided to the tool. Raised before any outbound call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Credential missing or rejected by the remote service.
    #[error("authentication failure: {0}")]
    AuthenticationFailure(String),

    /// Remote service unreachable, returned a non-success status, or sent an
    /// unreadable body.
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// The host cancelled the call.
    #[error("cancelled")]
    Cancelled,

    /// Internal error during tool execution.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Stable, machine-readable name for each [`ToolError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    AuthenticationFailure,
    RemoteUnavailable,
    Cancelled,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::AuthenticationFailure => "authentication_failure",
            Self::RemoteUnavailable => "remote_unavailable",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }
}

impl ToolError {
    /// Create an invalid input error.
    pub fn invalid_input<S: ToString>(s: S) -> Self {
        Self::InvalidInput(s.to_string())
    }

    /// Create an authentication failure.
    pub fn authentication<S: ToString>(s: S) -> Self {
        Self::AuthenticationFailure(s.to_string())
    }

    /// Create a remote-unavailable error.
    pub fn remote<S: ToString>(s: S) -> Self {
        Self::RemoteUnavailable(s.to_string())
    }

    /// Create an internal error.
    pub fn internal<S: ToString>(s: S) -> Self {
        Self::Internal(s.to_string())
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::AuthenticationFailure(_) => ErrorKind::AuthenticationFailure,
            Self::RemoteUnavailable(_) => ErrorKind::RemoteUnavailable,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Structured form sent to the host: `{"error": {"kind", "message"}}`.
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        })
    }
}
