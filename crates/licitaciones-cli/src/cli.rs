//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use licitaciones_core::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use licitaciones_core::GatewayConfig;
use std::time::Duration;

use crate::commands::{CallArgs, ServeArgs, ServeRestArgs};

/// Licitaciones gateway - MCP stdio server and REST facade over the licitaciones API
#[derive(Parser)]
#[command(name = "licitaciones")]
#[command(about = "Tool gateway for the licitaciones API")]
#[command(version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "LICITACIONES_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Client-agent string sent on every backend call
    #[arg(long, global = true, env = "LICITACIONES_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-call backend timeout in seconds
    #[arg(long, global = true, env = "LICITACIONES_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Gateway configuration resolved from flags and environment
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(self.base_url.as_str())
            .with_user_agent(self.user_agent.as_str())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server on stdin/stdout
    ServeMcp,

    /// Start the REST facade
    ServeRest(ServeRestArgs),

    /// Start the REST facade and optionally the MCP stdio server in one process
    Serve(ServeArgs),

    /// List the registered tools
    Tools {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Invoke one tool and print its result text
    Call(CallArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
