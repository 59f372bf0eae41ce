//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use licitaciones_core::{ErrorKind, ResultEnvelope};

use crate::dto::ErrorBody;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error enum
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A failed invocation, classified by the dispatcher
    #[error("{message}")]
    Gateway { kind: ErrorKind, message: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("MCP error: {0}")]
    Mcp(#[from] licitaciones_mcp::McpError),
}

impl ServerError {
    pub fn from_envelope(envelope: &ResultEnvelope) -> Self {
        let message = envelope
            .error_message
            .clone()
            .unwrap_or_else(|| "invocation failed".to_string());
        match envelope.error_kind {
            Some(kind) => ServerError::Gateway { kind, message },
            None => ServerError::Internal(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServerError::Gateway { kind, .. } => status_for_kind(*kind),
            ServerError::Internal(_) | ServerError::Mcp(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::InvalidInput(_) => ErrorKind::InvalidArguments.as_str(),
            ServerError::Gateway { kind, .. } => kind.as_str(),
            ServerError::Internal(_) | ServerError::Mcp(_) => "internal",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ServerError::Gateway { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Caller mistakes are 4xx, upstream failures 502/504
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArguments => StatusCode::BAD_REQUEST,
        ErrorKind::UnknownTool => StatusCode::NOT_FOUND,
        ErrorKind::HttpStatus | ErrorKind::Network | ErrorKind::Decode => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), kind = self.kind(), "{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), kind = self.kind(), "{}", self);
        }
        let body = ErrorBody {
            success: false,
            detail: self.detail(),
            kind: self.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
