//! One-shot tool invocation

use crate::error::{CliError, CliResult};
use crate::utils::parse_arguments;
use clap::Args;
use licitaciones_core::{GatewayConfig, Invocation};
use licitaciones_runtime::Dispatcher;

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name, e.g. obtener_licitacion_completa
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(long)]
    pub args: Option<String>,

    /// Print the backend request that would be sent without sending it
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn execute(config: &GatewayConfig, args: CallArgs) -> CliResult<()> {
    let dispatcher = Dispatcher::from_config(config)?;
    let invocation = Invocation::with_arguments(args.tool, parse_arguments(args.args.as_deref())?);

    if args.dry_run {
        let prepared = dispatcher
            .prepare(&invocation)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        println!("{}", serde_json::to_string_pretty(&prepared)?);
        return Ok(());
    }

    let tool = invocation.tool.clone();
    let envelope = dispatcher.dispatch(invocation).await;
    println!("{}", envelope.render_text());

    if envelope.is_success() {
        Ok(())
    } else {
        let kind = envelope
            .error_kind
            .map(|kind| kind.as_str())
            .unwrap_or("unknown");
        Err(CliError::ExecutionFailed(format!("{} ({})", tool, kind)))
    }
}
