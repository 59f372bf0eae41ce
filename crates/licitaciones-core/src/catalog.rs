//! The twelve licitaciones tools
//!
//! Paths are relative to the configured base URL. The registry joins them
//! into absolute templates at startup.

use crate::args::ArgsKind;
use crate::types::{BodyShape, HttpMethod, ToolDefinition, ToolName};

pub const LISTAR_LICITACIONES: &str = "listar_licitaciones";
pub const OBTENER_LICITACION_COMPLETA: &str = "obtener_licitacion_completa";
pub const VER_CORREO_LICITACION: &str = "ver_correo_licitacion";
pub const OBTENER_DETALLES_LICITACION: &str = "obtener_detalles_licitacion";
pub const OBTENER_DOCUMENTOS_REQUERIDOS: &str = "obtener_documentos_requeridos";
pub const CAMBIAR_ESTADO_LICITACION: &str = "cambiar_estado_licitacion";
pub const OBTENER_REQUISITOS_EXPERIENCIA: &str = "obtener_requisitos_experiencia";
pub const OBTENER_REQUISITOS_FINANCIEROS: &str = "obtener_requisitos_financieros";
pub const OBTENER_REQUISITOS_HV: &str = "obtener_requisitos_hv";
pub const OBTENER_RESUMEN_IA: &str = "obtener_resumen_ia";
pub const OBTENER_REQUISITOS_TECNICOS: &str = "obtener_requisitos_tecnicos";
pub const OBTENER_CRITERIOS_PUNTAJE: &str = "obtener_criterios_puntaje";

/// Static, base-independent description of a tool
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub args: ArgsKind,
    pub body: Option<BodyShape>,
    pub description: &'static str,
}

impl ToolSpec {
    const fn get(name: &'static str, path: &'static str, args: ArgsKind, description: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            path,
            args,
            body: None,
            description,
        }
    }

    /// Resolve against a backend base URL (no trailing slash)
    pub fn bind(&self, base: &str) -> ToolDefinition {
        ToolDefinition {
            name: ToolName::new(self.name),
            method: self.method,
            url_template: format!("{}{}", base, self.path),
            args: self.args,
            body: self.body,
            description: self.description.to_string(),
        }
    }
}

pub const TOOLS: [ToolSpec; 12] = [
    ToolSpec::get(
        LISTAR_LICITACIONES,
        "/api/licitaciones",
        ArgsKind::None,
        "Listar todas las licitaciones disponibles.",
    ),
    ToolSpec::get(
        OBTENER_LICITACION_COMPLETA,
        "/api/licitaciones/{licitacion_id}/completo",
        ArgsKind::Licitacion,
        "Obtener información completa de una licitación específica.",
    ),
    ToolSpec::get(
        VER_CORREO_LICITACION,
        "/api/licitaciones/{licitacion_id}/correo",
        ArgsKind::Licitacion,
        "Ver el correo original de una licitación.",
    ),
    ToolSpec::get(
        OBTENER_DETALLES_LICITACION,
        "/api/licitaciones/{licitacion_id}/detalles",
        ArgsKind::Licitacion,
        "Obtener detalles específicos de una licitación.",
    ),
    ToolSpec::get(
        OBTENER_DOCUMENTOS_REQUERIDOS,
        "/api/licitaciones/{licitacion_id}/documentos_requeridos",
        ArgsKind::Licitacion,
        "Obtener la lista de documentos requeridos para una licitación.",
    ),
    ToolSpec {
        name: CAMBIAR_ESTADO_LICITACION,
        method: HttpMethod::Post,
        path: "/api/licitaciones/{licitacion_id}/estado",
        args: ArgsKind::CambioEstado,
        body: Some(BodyShape::Estado),
        description: "Cambiar el estado de una licitación.",
    },
    ToolSpec::get(
        OBTENER_REQUISITOS_EXPERIENCIA,
        "/api/licitaciones/{licitacion_id}/experiencia",
        ArgsKind::Licitacion,
        "Obtener los requisitos de experiencia para una licitación.",
    ),
    ToolSpec::get(
        OBTENER_REQUISITOS_FINANCIEROS,
        "/api/licitaciones/{licitacion_id}/financiero",
        ArgsKind::Licitacion,
        "Obtener los requisitos financieros para una licitación.",
    ),
    ToolSpec::get(
        OBTENER_REQUISITOS_HV,
        "/api/licitaciones/{licitacion_id}/hv",
        ArgsKind::Licitacion,
        "Obtener los requisitos de hojas de vida para una licitación.",
    ),
    ToolSpec::get(
        OBTENER_RESUMEN_IA,
        "/api/licitaciones/{licitacion_id}/resumen_ia",
        ArgsKind::Licitacion,
        "Obtener un resumen generado por IA de una licitación.",
    ),
    ToolSpec::get(
        OBTENER_REQUISITOS_TECNICOS,
        "/api/licitaciones/{licitacion_id}/tecnicos",
        ArgsKind::Licitacion,
        "Obtener los requisitos técnicos de una licitación.",
    ),
    ToolSpec::get(
        OBTENER_CRITERIOS_PUNTAJE,
        "/api/licitaciones/{licitacion_id}/puntaje",
        ArgsKind::Licitacion,
        "Obtener los criterios de evaluación y puntaje de una licitación.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = TOOLS.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[test]
    fn only_estado_is_post() {
        let posts: Vec<_> = TOOLS
            .iter()
            .filter(|t| t.method == HttpMethod::Post)
            .map(|t| t.name)
            .collect();
        assert_eq!(posts, vec![CAMBIAR_ESTADO_LICITACION]);
        assert!(TOOLS
            .iter()
            .all(|t| t.body.is_some() == (t.method == HttpMethod::Post)));
    }

    #[test]
    fn bind_prefixes_base() {
        let def = TOOLS[1].bind("http://h/apilic");
        assert_eq!(def.url_template, "http://h/apilic/api/licitaciones/{licitacion_id}/completo");
        assert_eq!(def.name.as_str(), OBTENER_LICITACION_COMPLETA);
    }
}
