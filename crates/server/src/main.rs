//! openhours-mcp server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use openhours_client::HoursService;
use openhours_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let service = HoursService::from_config(&config).await?;

    tracing::info!(
        base_url = %config.base_url,
        cache_dir = %config.cache_dir.display(),
        "Starting openhours-mcp server on stdio transport"
    );

    let handler = handler::OpenHoursServer::new(service);
    let server = serve_server(handler, stdio()).await?;

    server.waiting().await?;

    Ok(())
}
