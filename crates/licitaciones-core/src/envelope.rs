use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ErrorKind, GatewayError};

/// A single request to execute a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

impl Invocation {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            arguments: Value::Object(Map::new()),
        }
    }

    pub fn with_arguments(tool: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool: tool.into(),
            arguments,
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.arguments.is_object() {
            self.arguments = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.arguments {
            map.insert(key.into(), value.into());
        }
        self
    }
}

/// Uniform outcome of an invocation, whichever front-end issued it.
///
/// On an upstream `HttpStatus` failure `data` carries the diagnostic body the
/// backend sent, when there was one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ResultEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_message: None,
            error_kind: None,
        }
    }

    pub fn failure(error: &GatewayError) -> Self {
        let data = match error {
            GatewayError::Transport(t) => t.upstream_body().cloned(),
            _ => None,
        };
        Self {
            success: false,
            data,
            error_message: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Text result as returned to agent runtimes: pretty-printed data on
    /// success, `Error: <message>` otherwise.
    pub fn render_text(&self) -> String {
        if self.success {
            let data = self.data.as_ref().unwrap_or(&Value::Null);
            serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
        } else {
            format!(
                "Error: {}",
                self.error_message.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

impl From<Result<Value, GatewayError>> for ResultEnvelope {
    fn from(result: Result<Value, GatewayError>) -> Self {
        match result {
            Ok(data) => ResultEnvelope::success(data),
            Err(e) => ResultEnvelope::failure(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use serde_json::json;

    #[test]
    fn success_renders_pretty_json() {
        let env = ResultEnvelope::success(json!({"id": "42", "titulo": "Obra vial"}));
        assert_eq!(
            env.render_text(),
            "{\n  \"id\": \"42\",\n  \"titulo\": \"Obra vial\"\n}"
        );
        let wire = serde_json::to_value(&env).unwrap();
        assert_eq!(wire, json!({"success": true, "data": {"id": "42", "titulo": "Obra vial"}}));
    }

    #[test]
    fn failure_renders_error_prefix() {
        let env = ResultEnvelope::failure(&GatewayError::UnknownTool("nope".into()));
        assert!(!env.success);
        assert_eq!(env.data, None);
        assert_eq!(env.error_kind, Some(ErrorKind::UnknownTool));
        assert_eq!(env.render_text(), "Error: unknown tool nope");
    }

    #[test]
    fn http_status_failure_keeps_upstream_body() {
        let err: GatewayError = TransportError::HttpStatus {
            status: 404,
            body: Some(json!({"detail": "Not found"})),
        }
        .into();
        let env = ResultEnvelope::failure(&err);
        assert_eq!(env.data, Some(json!({"detail": "Not found"})));
        assert!(env.error_message.unwrap().contains("404"));
    }

    #[test]
    fn invocation_builder() {
        let inv = Invocation::new("obtener_requisitos_hv").with_argument("licitacion_id", "3");
        assert_eq!(inv.arguments, json!({"licitacion_id": "3"}));

        let inv = Invocation::with_arguments("x", Value::Null).with_argument("a", 1);
        assert_eq!(inv.arguments, json!({"a": 1}));
    }
}
