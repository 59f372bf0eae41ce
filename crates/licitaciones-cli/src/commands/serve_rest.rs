//! Serve the REST facade

use anyhow::Result;
use clap::Args;
use licitaciones_core::GatewayConfig;
use licitaciones_runtime::Dispatcher;
use licitaciones_server::{restapi, AppState};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub struct ServeRestArgs {
    /// Host to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8004)]
    pub port: u16,
}

impl ServeRestArgs {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub async fn execute(config: &GatewayConfig, args: ServeRestArgs) -> Result<()> {
    let dispatcher = Arc::new(Dispatcher::from_config(config)?);
    let addr = args.addr();
    let socket = restapi::parse_addr(&addr)?;
    info!(base_url = %dispatcher.registry().base_url(), "Starting REST facade on {}", addr);
    licitaciones_server::serve_rest(AppState::new(dispatcher, socket.port()), &addr).await?;
    Ok(())
}
