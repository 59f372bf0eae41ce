//! List registered tools

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::utils::ColoredOutput;
use licitaciones_core::{GatewayConfig, ToolRegistry};
use serde_json::json;

pub fn execute(config: &GatewayConfig, format: OutputFormat) -> CliResult<()> {
    let registry = ToolRegistry::licitaciones(config).map_err(licitaciones_runtime::RuntimeError::from)?;

    match format {
        OutputFormat::Json => {
            let tools: Vec<_> = registry
                .tools()
                .map(|tool| {
                    json!({
                        "name": tool.name.as_str(),
                        "method": tool.method.as_str(),
                        "url_template": tool.url_template,
                        "description": tool.description,
                        "input_schema": tool.input_schema(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {}",
                ColoredOutput::highlight("Backend:"),
                registry.base_url()
            );
            for tool in registry.tools() {
                println!(
                    "  {:<32} {:<5} {}",
                    ColoredOutput::success(tool.name.as_str()),
                    tool.method.as_str(),
                    ColoredOutput::dim(&tool.url_template)
                );
            }
        }
    }
    Ok(())
}
