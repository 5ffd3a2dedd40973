//! Parallel web search and extract MCP tools.

pub mod extract;
pub mod remote;
pub mod search;
pub mod tools;
pub mod types;

use parallel_async::retry::RetryPolicy;
use parallel_async::{Client, ParallelConfig, ParallelError};

/// Shared state for the Parallel tools.
///
/// Holds one authenticated API client, reused by every call.
pub struct ParallelTools {
    pub(crate) client: Client<ParallelConfig>,
}

impl ParallelTools {
    /// Build the tools around a fresh client for `config`.
    ///
    /// # Errors
    /// Returns `ParallelError` if the HTTP client cannot be built.
    pub fn new(config: ParallelConfig) -> Result<Self, ParallelError> {
        Ok(Self::from_client(Client::with_config(config)?))
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn from_client(client: Client<ParallelConfig>) -> Self {
        Self { client }
    }

    /// Retry transient remote failures up to `max_retries` times.
    ///
    /// Zero leaves the client on a single attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        if max_retries > 0 {
            self.client = self
                .client
                .with_backoff(RetryPolicy::default().with_max_retries(max_retries).backoff());
        }
        self
    }
}

pub use tools::build_registry;
