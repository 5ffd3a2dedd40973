//! Core traits and types for building MCP tool servers.
//!
//! - [`Tool`]: a typed handler with a fixed `(input, context) -> output-or-error` signature
//! - [`ToolRegistry`]: name-keyed lookup table of type-erased tools, built once at startup
//! - [`ToolContext`]: per-call context carrying the host's cancellation signal
//! - [`ToolError`]: the error kinds every tool reports
//! - [`TextFormat`]: human-readable rendering for tool outputs

pub mod context;
pub mod error;
pub mod fmt;
pub mod registry;
pub mod schema;
pub mod tool;

pub use context::ToolContext;
pub use error::{ErrorKind, ToolError};
pub use fmt::TextFormat;
pub use registry::{ErasedTool, FormattedResult, ToolRegistry, ToolRegistryBuilder};
pub use tool::{Tool, ToolAnnotations};

// Re-export BoxFuture so tool crates don't need a direct futures dependency
pub use futures::future::BoxFuture;
