//! MCP server integration for toolbox registries.
//!
//! [`RegistryServer`] is an rmcp `ServerHandler` over a [`toolbox_core::ToolRegistry`]
//! with optional allowlist filtering. [`serve_http`] mounts it as a streamable-HTTP
//! endpoint; the re-exported [`stdio`] transport serves it over stdin/stdout.

mod http;
mod server;

pub use http::{MCP_PATH, router, serve_http};
pub use server::{OutputMode, RegistryServer};

// Re-export rmcp types for convenience
pub use rmcp::transport::stdio;
pub use rmcp::{ServerHandler, service::ServiceExt};
