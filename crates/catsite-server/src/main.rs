mod error;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use catsite_content::config::GatewayConfig;
use catsite_content::gateway::GatewayClient;
use catsite_content::pages::SiteContent;

use error::AppError;
use server::CatSiteServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting catsite MCP server");

    let site = Arc::new(load_site()?);
    let server = CatSiteServer::new(site);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}

fn load_site() -> Result<SiteContent, AppError> {
    let config = GatewayConfig::from_env()?;
    info!(
        api_base = %config.api_base,
        rest_namespace = %config.rest_namespace,
        child_namespace = %config.child_namespace,
        per_page = config.per_page,
        timeout_ms = config.timeout.as_millis(),
        "gateway configured"
    );
    Ok(SiteContent::new(GatewayClient::new(config)?))
}
