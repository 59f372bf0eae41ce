//! Error taxonomy for the licitaciones gateway

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Result type for invocation handling
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type for registry construction
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced while handling a single invocation.
///
/// All of them are caught at the dispatcher boundary and turned into a failed
/// [`ResultEnvelope`](crate::ResultEnvelope); none is fatal to the process.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("unknown tool {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures of the outbound backend call
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("backend returned HTTP {status}{}", body_suffix(.body))]
    HttpStatus { status: u16, body: Option<Value> },

    #[error("could not decode backend response: {message}")]
    Decode { message: String },
}

const MAX_BODY_IN_MESSAGE: usize = 300;

fn body_suffix(body: &Option<Value>) -> String {
    let text = match body {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    if text.chars().count() > MAX_BODY_IN_MESSAGE {
        let cut: String = text.chars().take(MAX_BODY_IN_MESSAGE).collect();
        format!(": {}...", cut)
    } else {
        format!(": {}", text)
    }
}

/// Machine-readable classification of a failed invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownTool,
    InvalidArguments,
    Network,
    Timeout,
    HttpStatus,
    Decode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownTool => "unknown_tool",
            ErrorKind::InvalidArguments => "invalid_arguments",
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::Decode => "decode",
        }
    }

    /// Whether the failure originated at (or on the way to) the backend
    /// rather than in the caller's request.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, ErrorKind::UnknownTool | ErrorKind::InvalidArguments)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GatewayError {
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::UnknownTool(_) => ErrorKind::UnknownTool,
            GatewayError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            GatewayError::Transport(t) => t.kind(),
        }
    }
}

impl TransportError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network { message: msg.into() }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode { message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Network { .. } => ErrorKind::Network,
            TransportError::Timeout { .. } => ErrorKind::Timeout,
            TransportError::HttpStatus { .. } => ErrorKind::HttpStatus,
            TransportError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Diagnostic body the backend sent along with a failure status, if any
    pub fn upstream_body(&self) -> Option<&Value> {
        match self {
            TransportError::HttpStatus { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// Startup-time configuration errors. Raised while building the registry,
/// never while serving a request.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("invalid URL template for tool '{tool}': {reason}")]
    InvalidTemplate { tool: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
