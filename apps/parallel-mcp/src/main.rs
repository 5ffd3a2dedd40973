//! MCP server exposing Parallel web search and extract.
//!
//! Serves `parallel_search`, `parallel_extract` and `smoke_ping` over
//! streamable HTTP at `/mcp` (default `0.0.0.0:8080`) or over stdio.

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use parallel_async::ParallelConfig;
use parallel_async::config::Config;
use parallel_tools::tools::TOOL_NAMES;
use parallel_tools::{ParallelTools, build_registry};
use toolbox_mcp::{RegistryServer, ServiceExt, serve_http, stdio};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Args;

const SERVER_NAME: &str = "parallel-search-mcp";

const DEFAULT_LOG_FILTER: &str = "parallel_mcp=info,parallel_tools=info,toolbox_mcp=info";

const INSTRUCTIONS: &str = "Parallel web search MCP server. Use parallel_search to search \
    the web with one or more keyword queries, and parallel_extract to pull excerpts or full \
    content from specific URLs.";

/// Logs go to stderr; stdout carries the protocol in stdio mode.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}

fn build_server(args: &Args, tools: ParallelTools) -> RegistryServer {
    let registry = build_registry(Arc::new(tools));
    let server = RegistryServer::new(Arc::new(registry))
        .with_info(SERVER_NAME, env!("CARGO_PKG_VERSION"))
        .with_output_mode(args.output_mode())
        .with_instructions(INSTRUCTIONS);

    match args.allowlist() {
        Some(allow) => {
            for name in allow.iter().filter(|n| !TOOL_NAMES.contains(&n.as_str())) {
                tracing::warn!(tool = %name, "allowlist names an unknown tool");
            }
            server.with_allowlist(allow)
        }
        None => server,
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();

    // .env must be loaded before env-backed flags and RUST_LOG are read
    let dot_env = if args.dot_env {
        let loaded = dotenvy::dotenv();
        args = Args::parse();
        Some(loaded)
    } else {
        None
    };

    init_logging();

    // Install the rustls CryptoProvider before any HTTP clients are created.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    match dot_env {
        Some(Ok(path)) => tracing::info!(path = %path.display(), "loaded .env"),
        Some(Err(e)) => tracing::warn!(error = %e, "could not load .env"),
        None => {}
    }

    let config = ParallelConfig::new();
    if config.validate_auth().is_err() {
        tracing::warn!(
            "PARALLEL_API_KEY is not set; search and extract will fail with authentication_failure"
        );
    }

    let tools = ParallelTools::new(config)
        .context("failed to build Parallel API client")?
        .with_max_retries(args.max_retries);
    let server = build_server(&args, tools);

    if args.list_tools {
        let names = server.effective_tool_names();
        eprintln!("Available tools ({}):", names.len());
        for n in names {
            eprintln!("  - {n}");
        }
        return Ok(());
    }

    tracing::info!(
        tools = server.effective_tool_names().len(),
        output_mode = ?server.output_mode(),
        max_retries = args.max_retries,
        "starting parallel-mcp"
    );

    if args.stdio {
        let service = server.serve(stdio()).await?;
        service.waiting().await?;
        return Ok(());
    }

    let addr = args.socket_addr()?;
    serve_http(server, addr, shutdown_signal())
        .await
        .with_context(|| format!("MCP server on {addr} failed"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbox_mcp::{OutputMode, ServerHandler};

    fn tools() -> ParallelTools {
        ParallelTools::new(ParallelConfig::new().with_api_key("test-key")).unwrap()
    }

    #[test]
    fn server_identifies_as_parallel_search_mcp() {
        let args = Args::try_parse_from(["parallel-mcp"]).unwrap();
        let info = build_server(&args, tools()).get_info();
        assert_eq!(info.server_info.name, "parallel-search-mcp");
        assert_eq!(info.instructions.as_deref(), Some(INSTRUCTIONS));
    }

    #[test]
    fn allowlist_and_output_mode_reach_the_server() {
        let args = Args::try_parse_from([
            "parallel-mcp",
            "--allow",
            "smoke_ping,unknown_tool",
            "--output",
            "structured",
        ])
        .unwrap();
        let server = build_server(&args, tools());
        assert_eq!(server.effective_tool_names(), vec!["smoke_ping"]);
        assert_eq!(server.output_mode(), OutputMode::Structured);
    }
}
