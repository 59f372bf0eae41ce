use indexmap::IndexMap;

use crate::catalog;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult, RegistryError, RegistryResult};
use crate::template;
use crate::types::{ToolDefinition, ToolName};

/// Immutable tool name → definition mapping, built once at startup.
///
/// Iteration follows registration order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    base_url: String,
    tools: IndexMap<ToolName, ToolDefinition>,
}

impl ToolRegistry {
    /// Empty registry rooted at the configured base URL
    pub fn new(config: &GatewayConfig) -> RegistryResult<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.base().to_string(),
            tools: IndexMap::new(),
        })
    }

    /// Registry holding the twelve licitaciones tools
    pub fn licitaciones(config: &GatewayConfig) -> RegistryResult<Self> {
        let mut registry = Self::new(config)?;
        for spec in catalog::TOOLS.iter() {
            registry.register(spec.bind(&registry.base_url))?;
        }
        Ok(registry)
    }

    /// Add a tool. Fails on a duplicate name or on a template the tool's
    /// declared arguments cannot satisfy.
    pub fn register(&mut self, tool: ToolDefinition) -> RegistryResult<()> {
        if self.tools.contains_key(tool.name.as_str()) {
            return Err(RegistryError::DuplicateTool(tool.name.to_string()));
        }
        Self::check(&tool)?;
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    fn check(tool: &ToolDefinition) -> RegistryResult<()> {
        let invalid = |reason: String| RegistryError::InvalidTemplate {
            tool: tool.name.to_string(),
            reason,
        };

        url::Url::parse(&tool.url_template.replace(['{', '}'], ""))
            .map_err(|e| invalid(format!("not an absolute URL: {}", e)))?;

        let names = template::placeholders(&tool.url_template).map_err(invalid)?;
        for name in names {
            if !tool.args.declares(name) {
                return Err(invalid(format!(
                    "placeholder '{{{}}}' is not a declared argument",
                    name
                )));
            }
        }

        match tool.body {
            Some(body) if body.source_args() != tool.args => Err(invalid(
                "request body does not match the declared arguments".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn lookup(&self, name: &str) -> GatewayResult<&ToolDefinition> {
        self.tools
            .get(name)
            .ok_or_else(|| GatewayError::UnknownTool(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(ToolName::as_str).collect()
    }

    pub fn tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
