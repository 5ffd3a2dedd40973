#![warn(missing_docs)]

//! Async client for the Parallel web API (`/search` and `/extract`), with typed
//! requests/responses and opt-in retries.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Retry logic utilities
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::ParallelConfig;
pub use crate::error::{ApiErrorObject, ParallelError};
