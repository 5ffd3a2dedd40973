//! Tool execution context.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::ToolError;

/// Context passed to tool executions.
///
/// Each call gets a fresh `call_id` for log correlation. The cancellation
/// token is the host's: when the MCP client cancels a request, the token fires
/// and [`ToolContext::run_cancellable`] drops the in-flight future.
#[derive(Clone, Debug)]
pub struct ToolContext {
    call_id: String,
    cancel: CancellationToken,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolContext {
    /// Create a context with its own, never-fired cancellation token.
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Create a context bound to the host's cancellation token.
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            call_id: Uuid::new_v4().to_string(),
            cancel,
        }
    }

    /// Unique identifier for this call.
    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    /// Whether the host has cancelled this call.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the call is cancelled first.
    ///
    /// On cancellation the future is dropped, which aborts any HTTP request it
    /// owns, and `ToolError::Cancelled` is returned.
    pub async fn run_cancellable<F, T>(&self, fut: F) -> Result<T, ToolError>
    where
        F: Future<Output = Result<T, ToolError>>,
    {
        self.cancel
            .run_until_cancelled(fut)
            .await
            .unwrap_or_else(|| Err(ToolError::Cancelled))
    }
}
