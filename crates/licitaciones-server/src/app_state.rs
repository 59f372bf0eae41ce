//! Application state shared by the REST and MCP-over-HTTP handlers

use licitaciones_mcp::McpServer;
use licitaciones_runtime::Dispatcher;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub mcp: Arc<McpServer>,
    /// Advertised on `GET /`
    pub port: u16,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>, port: u16) -> Self {
        let mcp = Arc::new(McpServer::new(dispatcher.clone()));
        Self { dispatcher, mcp, port }
    }
}
