//! Licitaciones gateway CLI entry point

use clap::Parser;
use licitaciones_cli::{
    cli::{Cli, Commands},
    commands,
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use tracing::info;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("Licitaciones gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.gateway_config();
    match cli.command {
        Commands::ServeMcp => commands::serve_mcp::execute(&config)
            .await
            .map_err(|e| e.into()),

        Commands::ServeRest(args) => commands::serve_rest::execute(&config, args)
            .await
            .map_err(|e| e.into()),

        Commands::Serve(args) => commands::serve::execute(&config, args)
            .await
            .map_err(|e| e.into()),

        Commands::Tools { format } => commands::tools::execute(&config, format),

        Commands::Call(args) => commands::call::execute(&config, args).await,
    }
}
