//! Command-line and environment configuration.

use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use toolbox_mcp::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "parallel-mcp")]
#[command(about = "MCP server for Parallel web search and extract", version)]
pub struct Args {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to serve MCP on (endpoint path: /mcp)
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Serve over stdin/stdout instead of HTTP
    #[arg(long)]
    pub stdio: bool,

    /// Output mode for tool results
    #[arg(long, value_enum, default_value_t = Output::Text)]
    pub output: Output,

    /// Comma-separated tool allowlist. Example: parallel_search,smoke_ping
    #[arg(long, value_name = "NAMES")]
    pub allow: Option<String>,

    /// List available tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Retry transient API failures (429, 5xx, timeouts) up to N times
    #[arg(long, env = "PARALLEL_MAX_RETRIES", default_value_t = 0)]
    pub max_retries: usize,

    /// Load environment variables from a .env file before starting
    #[arg(long)]
    pub dot_env: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Text,
    Structured,
}

impl Args {
    pub fn output_mode(&self) -> OutputMode {
        match self.output {
            Output::Text => OutputMode::Text,
            Output::Structured => OutputMode::Structured,
        }
    }

    /// Tool names from `--allow`, or `None` when every tool is enabled.
    pub fn allowlist(&self) -> Option<Vec<String>> {
        let names: Vec<String> = self
            .allow
            .as_deref()?
            .split(',')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        (!names.is_empty()).then_some(names)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("{} did not resolve to an address", self.host))
    }
}
