//! Streamable-HTTP transport for a [`RegistryServer`].

use crate::server::RegistryServer;
use rmcp::transport::StreamableHttpServerConfig;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, tower::StreamableHttpService,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

/// Path the MCP endpoint is mounted at.
pub const MCP_PATH: &str = "/mcp";

/// Build the axum router serving `server` at [`MCP_PATH`].
///
/// Runs in stateless mode: every POST is answered on its own, with no
/// session id to track.
pub fn router(server: RegistryServer) -> axum::Router {
    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = false;

    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        config,
    );

    axum::Router::new().nest_service(MCP_PATH, service)
}

/// Serve `server` over streamable HTTP on `addr` until `shutdown` resolves.
pub async fn serve_http(
    server: RegistryServer,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, path = MCP_PATH, "MCP server listening");

    axum::serve(listener, router(server))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("MCP server stopped");
    Ok(())
}
