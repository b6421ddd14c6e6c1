//! unfurl MCP server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;
use unfurl_client::{FetchConfig, Unfurler};
use unfurl_core::AppConfig;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let unfurler = Unfurler::new(FetchConfig::from(&config))?;

    tracing::info!(
        timeout_secs = config.timeout_secs,
        max_content_length = config.max_content_length,
        "Starting unfurl server on stdio transport"
    );

    let handler = handler::UnfurlServer::new(unfurler);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
