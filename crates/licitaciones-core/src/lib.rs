//! Licitaciones gateway core
//!
//! Data model, tool registry and error taxonomy shared by the backend client,
//! the dispatcher and both front-end adapters (MCP stdio and REST).

pub mod args;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod template;
pub mod types;

// Re-export commonly used types
pub use args::{ArgsKind, CambioEstadoArgs, LicitacionArgs, ParamSpec, ToolArgs};
pub use backend::Backend;
pub use config::GatewayConfig;
pub use envelope::{Invocation, ResultEnvelope};
pub use error::{
    ErrorKind, GatewayError, GatewayResult, RegistryError, RegistryResult, TransportError,
};
pub use registry::ToolRegistry;
pub use types::{BodyShape, HttpMethod, ToolDefinition, ToolName};
