//! Licitaciones MCP (Model Context Protocol) server
//!
//! Exposes the twelve licitaciones tools to agent runtimes as MCP tools over
//! newline-delimited JSON-RPC 2.0 on stdin/stdout.

pub mod error;
pub mod jsonrpc;
pub mod mcp;
pub mod server;

pub use error::{McpError, McpResult};
pub use server::{serve_io, serve_stdio, McpServer};
