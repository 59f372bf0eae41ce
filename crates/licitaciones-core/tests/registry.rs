use licitaciones_core::{
    catalog, ArgsKind, BodyShape, ErrorKind, GatewayConfig, HttpMethod, RegistryError,
    ToolDefinition, ToolName, ToolRegistry,
};
use serde_json::json;

fn config() -> GatewayConfig {
    GatewayConfig::new("http://backend.test/apilic/")
}

fn tool(name: &str, url_template: &str, args: ArgsKind) -> ToolDefinition {
    ToolDefinition {
        name: ToolName::new(name),
        method: HttpMethod::Get,
        url_template: url_template.to_string(),
        args,
        body: None,
        description: String::new(),
    }
}

#[test]
fn registers_the_twelve_tools_in_order() {
    let registry = ToolRegistry::licitaciones(&config()).unwrap();
    assert_eq!(registry.len(), 12);
    assert_eq!(registry.base_url(), "http://backend.test/apilic");
    assert_eq!(
        registry.names(),
        vec![
            "listar_licitaciones",
            "obtener_licitacion_completa",
            "ver_correo_licitacion",
            "obtener_detalles_licitacion",
            "obtener_documentos_requeridos",
            "cambiar_estado_licitacion",
            "obtener_requisitos_experiencia",
            "obtener_requisitos_financieros",
            "obtener_requisitos_hv",
            "obtener_resumen_ia",
            "obtener_requisitos_tecnicos",
            "obtener_criterios_puntaje",
        ]
    );
}

#[test]
fn lookup_unknown_tool_is_an_invocation_error() {
    let registry = ToolRegistry::licitaciones(&config()).unwrap();
    let err = registry.lookup("nonexistent-tool").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTool);
}

#[test]
fn estado_is_the_only_post_tool() {
    let registry = ToolRegistry::licitaciones(&config()).unwrap();
    let estado = registry.lookup(catalog::CAMBIAR_ESTADO_LICITACION).unwrap();
    assert_eq!(estado.method, HttpMethod::Post);
    assert_eq!(estado.body, Some(BodyShape::Estado));
    assert_eq!(
        estado.url_template,
        "http://backend.test/apilic/api/licitaciones/{licitacion_id}/estado"
    );
    assert_eq!(registry.tools().filter(|t| !t.is_read_only()).count(), 1);
}

#[test]
fn every_tool_publishes_a_schema() {
    let registry = ToolRegistry::licitaciones(&config()).unwrap();
    let listar = registry.lookup("listar_licitaciones").unwrap();
    assert_eq!(listar.input_schema()["required"], json!([]));

    for tool in registry.tools().filter(|t| t.name.as_str() != "listar_licitaciones") {
        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object", "{}", tool.name);
        assert!(schema["required"]
            .as_array()
            .unwrap()
            .contains(&json!("licitacion_id")));
        assert!(!tool.description.is_empty());
    }
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = ToolRegistry::licitaciones(&config()).unwrap();
    let err = registry
        .register(tool(
            "listar_licitaciones",
            "http://backend.test/api/otra",
            ArgsKind::None,
        ))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTool(name) if name == "listar_licitaciones"));
}

#[test]
fn template_must_be_satisfiable_by_declared_arguments() {
    let mut registry = ToolRegistry::new(&config()).unwrap();

    let err = registry
        .register(tool("a", "http://backend.test/api/{licitacion_id}", ArgsKind::None))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidTemplate { .. }));

    let err = registry
        .register(tool("b", "http://backend.test/api/{licitacion_id", ArgsKind::Licitacion))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidTemplate { .. }));

    let err = registry
        .register(tool("c", "/relative/{licitacion_id}", ArgsKind::Licitacion))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidTemplate { .. }));

    let mut bad_body = tool("d", "http://backend.test/api/{licitacion_id}", ArgsKind::Licitacion);
    bad_body.method = HttpMethod::Post;
    bad_body.body = Some(BodyShape::Estado);
    assert!(registry.register(bad_body).is_err());

    assert!(registry.is_empty());
    registry
        .register(tool("e", "http://backend.test/api/{licitacion_id}", ArgsKind::Licitacion))
        .unwrap();
    assert_eq!(registry.names(), vec!["e"]);
}

#[test]
fn invalid_config_fails_at_startup() {
    let err = ToolRegistry::licitaciones(&GatewayConfig::new("::::")).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidConfig(_)));
}
