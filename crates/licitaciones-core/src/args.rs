//! Typed per-tool arguments
//!
//! Callers send a loosely-typed JSON object. Each tool declares an
//! [`ArgsKind`]; the dispatcher parses the object into the matching
//! [`ToolArgs`] variant before any request is built, so the rest of the
//! pipeline never looks up keys by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GatewayError, GatewayResult};

pub const LICITACION_ID: &str = "licitacion_id";
pub const NUEVO_ESTADO: &str = "nuevo_estado";

/// One declared parameter, used for schema publication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
}

const LICITACION_ID_PARAM: ParamSpec = ParamSpec {
    name: LICITACION_ID,
    description: "ID de la licitación",
};

const NUEVO_ESTADO_PARAM: ParamSpec = ParamSpec {
    name: NUEVO_ESTADO,
    description: "Nuevo estado para la licitación (ej: \"abierta\", \"cerrada\", \"en_evaluacion\", \"adjudicada\")",
};

/// Argument shape a tool declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgsKind {
    /// No arguments
    None,
    /// `{ licitacion_id }`
    Licitacion,
    /// `{ licitacion_id, nuevo_estado }`
    CambioEstado,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicitacionArgs {
    pub licitacion_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CambioEstadoArgs {
    pub licitacion_id: String,
    pub nuevo_estado: String,
}

/// Validated arguments of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolArgs {
    None,
    Licitacion(LicitacionArgs),
    CambioEstado(CambioEstadoArgs),
}

impl ArgsKind {
    pub fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            ArgsKind::None => &[],
            ArgsKind::Licitacion => &[LICITACION_ID_PARAM],
            ArgsKind::CambioEstado => &[LICITACION_ID_PARAM, NUEVO_ESTADO_PARAM],
        }
    }

    pub fn declares(&self, name: &str) -> bool {
        self.parameters().iter().any(|p| p.name == name)
    }

    /// Parse a caller-supplied argument set. `null` counts as an empty object;
    /// unknown keys are ignored.
    pub fn parse(&self, arguments: &Value) -> GatewayResult<ToolArgs> {
        let empty = Map::new();
        let map = match arguments {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(GatewayError::invalid_arguments(format!(
                    "arguments must be an object, got {}",
                    json_type_name(other)
                )))
            }
        };

        match self {
            ArgsKind::None => Ok(ToolArgs::None),
            ArgsKind::Licitacion => Ok(ToolArgs::Licitacion(LicitacionArgs {
                licitacion_id: required_id(map, LICITACION_ID)?,
            })),
            ArgsKind::CambioEstado => Ok(ToolArgs::CambioEstado(CambioEstadoArgs {
                licitacion_id: required_id(map, LICITACION_ID)?,
                nuevo_estado: required_text(map, NUEVO_ESTADO)?,
            })),
        }
    }
}

impl ToolArgs {
    /// Value for a URL placeholder
    pub fn path_value(&self, name: &str) -> Option<&str> {
        match (self, name) {
            (ToolArgs::Licitacion(a), LICITACION_ID) => Some(&a.licitacion_id),
            (ToolArgs::CambioEstado(a), LICITACION_ID) => Some(&a.licitacion_id),
            _ => None,
        }
    }
}

/// Identifiers arrive as strings from most agents, but some send integers.
fn required_id(map: &Map<String, Value>, key: &str) -> GatewayResult<String> {
    let value = map
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| missing(key))?;
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        other => {
            return Err(GatewayError::invalid_arguments(format!(
                "parameter '{}' must be a string or integer, got {}",
                key,
                json_type_name(other)
            )))
        }
    };
    if id.is_empty() {
        return Err(GatewayError::invalid_arguments(format!(
            "parameter '{}' must not be empty",
            key
        )));
    }
    Ok(id)
}

fn required_text(map: &Map<String, Value>, key: &str) -> GatewayResult<String> {
    let value = map
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| missing(key))?;
    let text = value.as_str().ok_or_else(|| {
        GatewayError::invalid_arguments(format!(
            "parameter '{}' must be a string, got {}",
            key,
            json_type_name(value)
        ))
    })?;
    if text.trim().is_empty() {
        return Err(GatewayError::invalid_arguments(format!(
            "parameter '{}' must not be empty",
            key
        )));
    }
    Ok(text.to_string())
}

fn missing(key: &str) -> GatewayError {
    GatewayError::invalid_arguments(format!("missing required parameter: {}", key))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn parses_licitacion_id_from_string_or_integer() {
        let args = ArgsKind::Licitacion.parse(&json!({"licitacion_id": "42"})).unwrap();
        assert_eq!(args.path_value(LICITACION_ID), Some("42"));

        let args = ArgsKind::Licitacion.parse(&json!({"licitacion_id": 42})).unwrap();
        assert_eq!(args.path_value(LICITACION_ID), Some("42"));
    }

    #[test]
    fn missing_or_empty_id_is_invalid() {
        for input in [json!({}), json!({"licitacion_id": ""}), json!({"licitacion_id": null})] {
            let err = ArgsKind::Licitacion.parse(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArguments);
            assert!(err.to_string().contains("licitacion_id"));
        }
    }

    #[test]
    fn wrong_types_are_invalid() {
        let err = ArgsKind::Licitacion.parse(&json!({"licitacion_id": 1.5})).unwrap_err();
        assert!(err.to_string().contains("string or integer"));

        let err = ArgsKind::CambioEstado
            .parse(&json!({"licitacion_id": "1", "nuevo_estado": true}))
            .unwrap_err();
        assert!(err.to_string().contains("nuevo_estado"));

        let err = ArgsKind::None.parse(&json!(["a"])).unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }

    #[test]
    fn null_and_extra_keys_are_tolerated() {
        assert_eq!(ArgsKind::None.parse(&Value::Null).unwrap(), ToolArgs::None);
        assert_eq!(ArgsKind::None.parse(&json!({"foo": 1})).unwrap(), ToolArgs::None);

        let args = ArgsKind::CambioEstado
            .parse(&json!({"licitacion_id": "9", "nuevo_estado": "cerrada", "motivo": "x"}))
            .unwrap();
        assert_eq!(
            args,
            ToolArgs::CambioEstado(CambioEstadoArgs {
                licitacion_id: "9".into(),
                nuevo_estado: "cerrada".into()
            })
        );
    }

    #[test]
    fn path_values_only_for_declared_names() {
        let args = ArgsKind::Licitacion.parse(&json!({"licitacion_id": "5"})).unwrap();
        assert_eq!(args.path_value("licitacion_id"), Some("5"));
        assert_eq!(args.path_value("nuevo_estado"), None);
        assert!(ArgsKind::CambioEstado.declares("nuevo_estado"));
        assert!(!ArgsKind::Licitacion.declares("nuevo_estado"));
    }
}
