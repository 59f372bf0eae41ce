//! Serve MCP over stdio

use anyhow::Result;
use licitaciones_core::GatewayConfig;
use licitaciones_runtime::Dispatcher;
use std::sync::Arc;
use tracing::info;

pub async fn execute(config: &GatewayConfig) -> Result<()> {
    let dispatcher = Arc::new(Dispatcher::from_config(config)?);
    info!(
        base_url = %dispatcher.registry().base_url(),
        tools = dispatcher.registry().len(),
        "Starting MCP server on stdio"
    );
    licitaciones_mcp::serve_stdio(dispatcher).await?;
    Ok(())
}
