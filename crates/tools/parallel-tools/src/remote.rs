//! Mapping of client errors into tool error kinds.

use parallel_async::ParallelError;
use toolbox_core::ToolError;

/// Map a failed remote call into a [`ToolError`].
///
/// Missing or rejected credentials become `AuthenticationFailure`; every
/// other failure (transport, non-2xx, undecodable body) becomes
/// `RemoteUnavailable`. The message names the operation and `subject`.
pub fn map_remote_error(operation: &str, subject: &str, err: &ParallelError) -> ToolError {
    if err.is_auth_failure() {
        ToolError::authentication(format!("{operation} failed: {err}"))
    } else {
        ToolError::remote(format!("{operation} failed for {subject}: {err}"))
    }
}
