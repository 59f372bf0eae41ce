//! Error handling for the MCP server

use crate::jsonrpc::JsonRpcError;
use thiserror::Error;

/// Result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;

/// Errors that can occur in MCP operations
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    /// Convert to JSON-RPC error
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            McpError::InvalidParams(msg) => {
                JsonRpcError::invalid_params().with_data(serde_json::json!({
                    "message": msg
                }))
            }
            // params present but not of the expected shape
            McpError::Serialization(e) => {
                JsonRpcError::invalid_params().with_data(serde_json::json!({
                    "message": e.to_string()
                }))
            }
            _ => JsonRpcError::internal_error().with_data(serde_json::json!({
                "message": self.to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonrpc::{INTERNAL_ERROR, INVALID_PARAMS};

    #[test]
    fn params_errors_map_to_invalid_params() {
        let err = McpError::InvalidParams("missing name".into()).to_jsonrpc_error();
        assert_eq!(err.code, INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["message"], "missing name");

        let err = McpError::Internal("boom".into()).to_jsonrpc_error();
        assert_eq!(err.code, INTERNAL_ERROR);
    }
}
