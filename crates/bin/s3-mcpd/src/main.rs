//! Daemon entry point for the S3 MCP server.
//!
//! Loads configuration from the environment, connects the S3 client once,
//! and serves the MCP protocol over stdio (or streamable HTTP when an address
//! is configured) until interrupted.

mod config;

use std::sync::Arc;

use s3_core::store::S3ObjectStore;
use s3_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::S3McpConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config = S3McpConfig::from_args()?;
    info!(
        endpoint = %config.storage.endpoint,
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        "starting s3-mcpd"
    );
    let store = Arc::new(S3ObjectStore::connect(config.storage).await);

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_interrupt(shutdown.clone()));

    match config.http_addr {
        Some(addr) => {
            serve_streamable_http(store, McpHttpServerConfig::new(addr), shutdown).await?;
        }
        None => serve_stdio(store, shutdown).await?,
    }
    info!("s3-mcpd stopped");
    Ok(())
}

/// Logs go to stderr; stdout carries the stdio transport.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn cancel_on_interrupt(shutdown: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for interrupt signal");
        return;
    }
    info!("interrupt received, shutting down");
    shutdown.cancel();
}
