//! REST API DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful tool route response
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub success: bool,
    pub data: Value,
}

impl ToolResponse {
    pub fn new(data: Value) -> Self {
        Self { success: true, data }
    }
}

/// Failure body of every route
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub detail: String,
    pub kind: String,
}

/// Body of `POST /api/licitaciones/:id/estado`
#[derive(Debug, Deserialize)]
pub struct CambioEstadoRequest {
    pub nuevo_estado: String,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<String>,
}
