//! Service info and health check handlers

use crate::{dto::ToolsList, AppState};
use axum::{extract::State, response::Json};
use serde_json::{json, Value};

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "MCP Server - Licitaciones",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "port": state.port,
        "endpoints": {
            "health": "/health",
            "tools": "/api/tools",
            "mcp": "/mcp",
            "listar_licitaciones": "/api/licitaciones",
            "obtener_licitacion": "/api/licitaciones/{licitacion_id}",
        }
    }))
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "mcp-licitaciones"}))
}

/// GET /api/tools
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsList> {
    let tools = state
        .dispatcher
        .registry()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(ToolsList { tools })
}
