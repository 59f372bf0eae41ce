use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::borrow::Borrow;
use std::fmt;

use crate::args::{ArgsKind, ToolArgs};
use crate::error::{GatewayError, GatewayResult};
use crate::template;

/// Unique identifier of a tool within the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolName(String);

impl ToolName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ToolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToolName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared request body of a POST tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// `{"estado": <nuevo_estado>}`
    Estado,
}

impl BodyShape {
    /// Arguments shape this body is built from
    pub fn source_args(&self) -> ArgsKind {
        match self {
            BodyShape::Estado => ArgsKind::CambioEstado,
        }
    }

    pub fn build(&self, args: &ToolArgs) -> GatewayResult<Value> {
        match (self, args) {
            (BodyShape::Estado, ToolArgs::CambioEstado(a)) => Ok(json!({ "estado": a.nuevo_estado })),
            _ => Err(GatewayError::invalid_arguments(
                "arguments do not match the declared request body",
            )),
        }
    }
}

/// Immutable description of one tool: how its invocation maps onto the wire
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub method: HttpMethod,
    /// Absolute URL with `{param}` placeholders
    pub url_template: String,
    pub args: ArgsKind,
    pub body: Option<BodyShape>,
    pub description: String,
}

impl ToolDefinition {
    /// Substitute every placeholder with the matching (percent-encoded) argument
    pub fn resolve_url(&self, args: &ToolArgs) -> GatewayResult<String> {
        template::render(&self.url_template, |name| args.path_value(name)).map_err(|missing| {
            GatewayError::invalid_arguments(format!("missing required parameter: {}", missing))
        })
    }

    /// JSON Schema of the tool's arguments, as published to agent runtimes
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.args.parameters() {
            properties.insert(
                param.name.to_string(),
                json!({"type": "string", "description": param.description}),
            );
            required.push(Value::String(param.name.to_string()));
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Whether calling the tool can change backend state
    pub fn is_read_only(&self) -> bool {
        self.method == HttpMethod::Get
    }
}
