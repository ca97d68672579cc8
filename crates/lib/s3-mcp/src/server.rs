//! MCP server runners for s3-mcp.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use s3_core::store::ObjectStore;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::S3Mcp;

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }
}

/// Serves the MCP server over stdio until the client disconnects or
/// `shutdown` is cancelled.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio<S: ObjectStore>(
    store: Arc<S>,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = S3Mcp::with_store(store);
    let (stdin, stdout) = stdio();
    let running = service.serve_with_ct((stdin, stdout), shutdown).await?;
    let reason = running.waiting().await?;
    info!(?reason, "mcp stdio session closed");
    Ok(())
}

/// Serves the MCP server using streamable HTTP transport until `shutdown`
/// is cancelled.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http<S: ObjectStore>(
    store: Arc<S>,
    config: McpHttpServerConfig,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service: StreamableHttpService<S3Mcp<S>, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(S3Mcp::with_store(store.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                sse_retry: config.sse_retry,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    info!(addr = %config.addr, "s3-mcp listening on streamable HTTP");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    Ok(())
}
