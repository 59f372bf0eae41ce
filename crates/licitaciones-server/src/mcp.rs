//! MCP over HTTP: one JSON-RPC message per POST, answered by the same
//! server that backs the stdio transport

use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use licitaciones_mcp::mcp::SUPPORTED_PROTOCOL_VERSIONS;
use serde_json::json;

const PROTOCOL_VERSION_HEADER: &str = "mcp-protocol-version";

/// POST /mcp
pub async fn handle_mcp_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Validate MCP protocol version
    if let Some(protocol_version) = headers.get(PROTOCOL_VERSION_HEADER) {
        let version_str = protocol_version.to_str().unwrap_or("");
        if !SUPPORTED_PROTOCOL_VERSIONS.contains(&version_str) {
            tracing::warn!("Unsupported MCP protocol version: {}", version_str);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Unsupported MCP protocol version",
                    "supported_versions": SUPPORTED_PROTOCOL_VERSIONS
                })),
            )
                .into_response();
        }
    }

    match state.mcp.process_message(&body).await {
        Some(response) => Json(response).into_response(),
        // notification
        None => StatusCode::ACCEPTED.into_response(),
    }
}
