//! Unified server: REST facade plus optional MCP stdio sharing one dispatcher

use anyhow::Result;
use clap::Args;
use licitaciones_core::GatewayConfig;
use licitaciones_runtime::Dispatcher;
use licitaciones_server::ServeConfig;
use std::sync::Arc;
use tracing::info;

use super::serve_rest::ServeRestArgs;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub rest: ServeRestArgs,

    /// Also serve MCP on stdin/stdout
    #[arg(long)]
    pub mcp_stdio: bool,
}

impl ServeArgs {
    pub fn serve_config(&self) -> ServeConfig {
        ServeConfig {
            rest_addr: Some(self.rest.addr()),
            mcp_stdio: self.mcp_stdio,
        }
    }
}

pub async fn execute(config: &GatewayConfig, args: ServeArgs) -> Result<()> {
    let dispatcher = Arc::new(Dispatcher::from_config(config)?);
    let serve_config = args.serve_config();
    info!(
        rest = %args.rest.addr(),
        mcp_stdio = args.mcp_stdio,
        "Starting unified server"
    );
    licitaciones_server::serve_unified(dispatcher, serve_config).await?;
    Ok(())
}
