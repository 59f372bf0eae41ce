//! REST API router

use crate::{restapi::handlers, AppState};
use axum::{
    extract::{Path, State},
    routing::{get, post, MethodRouter},
    Router,
};
use licitaciones_core::catalog;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// GET route for a tool addressed by licitación id
fn licitacion_route(tool: &'static str) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, Path(id): Path<String>| async move {
        handlers::licitaciones::by_id(&state, tool, id).await
    })
}

/// Create REST API router.
///
/// Tool routes keep both the historical facade paths (`/:id`, `/documentos`,
/// `/resumen-ia`) and the paths that mirror the backend.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/api/tools", get(handlers::health::list_tools))
        .route("/mcp", post(crate::mcp::handle_mcp_request))
        .route("/api/licitaciones", get(handlers::licitaciones::listar))
        .route(
            "/api/licitaciones/:id",
            licitacion_route(catalog::OBTENER_LICITACION_COMPLETA),
        )
        .route(
            "/api/licitaciones/:id/completo",
            licitacion_route(catalog::OBTENER_LICITACION_COMPLETA),
        )
        .route(
            "/api/licitaciones/:id/correo",
            licitacion_route(catalog::VER_CORREO_LICITACION),
        )
        .route(
            "/api/licitaciones/:id/detalles",
            licitacion_route(catalog::OBTENER_DETALLES_LICITACION),
        )
        .route(
            "/api/licitaciones/:id/documentos",
            licitacion_route(catalog::OBTENER_DOCUMENTOS_REQUERIDOS),
        )
        .route(
            "/api/licitaciones/:id/documentos_requeridos",
            licitacion_route(catalog::OBTENER_DOCUMENTOS_REQUERIDOS),
        )
        .route(
            "/api/licitaciones/:id/estado",
            post(handlers::licitaciones::cambiar_estado),
        )
        .route(
            "/api/licitaciones/:id/experiencia",
            licitacion_route(catalog::OBTENER_REQUISITOS_EXPERIENCIA),
        )
        .route(
            "/api/licitaciones/:id/financiero",
            licitacion_route(catalog::OBTENER_REQUISITOS_FINANCIEROS),
        )
        .route(
            "/api/licitaciones/:id/hv",
            licitacion_route(catalog::OBTENER_REQUISITOS_HV),
        )
        .route(
            "/api/licitaciones/:id/resumen-ia",
            licitacion_route(catalog::OBTENER_RESUMEN_IA),
        )
        .route(
            "/api/licitaciones/:id/resumen_ia",
            licitacion_route(catalog::OBTENER_RESUMEN_IA),
        )
        .route(
            "/api/licitaciones/:id/tecnicos",
            licitacion_route(catalog::OBTENER_REQUISITOS_TECNICOS),
        )
        .route(
            "/api/licitaciones/:id/puntaje",
            licitacion_route(catalog::OBTENER_CRITERIOS_PUNTAJE),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
