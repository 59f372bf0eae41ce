//! Licitaciones Server
//!
//! REST facade over the tool dispatcher, plus a unified entry point that runs
//! the REST facade and the MCP stdio server in one process against a single
//! shared dispatcher.

pub mod app_state;
pub mod dto;
pub mod error;
pub mod mcp;
pub mod restapi;

// Re-export key types
pub use app_state::AppState;
pub use error::{ServerError, ServerResult};

use licitaciones_runtime::Dispatcher;
use std::sync::Arc;
use tokio::task::JoinSet;

// REST API
pub async fn serve_rest(app_state: AppState, addr: &str) -> ServerResult<()> {
    restapi::serve(app_state, addr).await
}

/// Unified server: run REST and/or MCP stdio concurrently in one process
pub struct ServeConfig {
    pub rest_addr: Option<String>,
    pub mcp_stdio: bool,
}

pub async fn serve_unified(dispatcher: Arc<Dispatcher>, cfg: ServeConfig) -> ServerResult<()> {
    let mut tasks: JoinSet<ServerResult<()>> = JoinSet::new();
    if let Some(addr) = cfg.rest_addr.clone() {
        let socket = restapi::parse_addr(&addr)?;
        let st = AppState::new(dispatcher.clone(), socket.port());
        tasks.spawn(async move { restapi::serve(st, &addr).await });
    }
    if cfg.mcp_stdio {
        let dp = dispatcher.clone();
        tasks.spawn(async move {
            licitaciones_mcp::serve_stdio(dp).await.map_err(ServerError::from)
        });
    }

    // If no services configured, return error
    if tasks.is_empty() {
        return Err(ServerError::InvalidInput(
            "No services configured to run".to_string(),
        ));
    }

    supervise(tasks).await
}

/// Wait for the services; the first one to fail stops the rest
async fn supervise(mut tasks: JoinSet<ServerResult<()>>) -> ServerResult<()> {
    while let Some(joined) = tasks.join_next().await {
        let result = joined.map_err(|e| ServerError::Internal(format!("Join error: {}", e)))?;
        if let Err(e) = result {
            tracing::error!("Service stopped: {}", e);
            tasks.shutdown().await;
            return Err(e);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn first_failing_service_stops_the_others() {
        let mut tasks: JoinSet<ServerResult<()>> = JoinSet::new();
        tasks.spawn(async {
            std::future::pending::<()>().await;
            Ok(())
        });
        tasks.spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err(ServerError::Internal("stdio closed".into()))
        });

        let result = tokio::time::timeout(Duration::from_secs(5), supervise(tasks))
            .await
            .expect("supervise did not return");
        assert!(matches!(result, Err(ServerError::Internal(msg)) if msg == "stdio closed"));
    }

    #[tokio::test]
    async fn services_that_finish_cleanly_are_ok() {
        let mut tasks: JoinSet<ServerResult<()>> = JoinSet::new();
        tasks.spawn(async { Ok(()) });
        tasks.spawn(async { Ok(()) });
        assert!(supervise(tasks).await.is_ok());
    }
}
