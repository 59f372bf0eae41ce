//! Tool routes: each maps path segments (and the estado body) onto one
//! dispatcher invocation

use crate::{
    dto::{CambioEstadoRequest, ToolResponse},
    AppState, ServerError, ServerResult,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use licitaciones_core::{catalog, Invocation};
use serde_json::{json, Value};

pub async fn invoke(state: &AppState, tool: &str, arguments: Value) -> ServerResult<Json<ToolResponse>> {
    let envelope = state
        .dispatcher
        .dispatch(Invocation::with_arguments(tool, arguments))
        .await;
    if envelope.success {
        Ok(Json(ToolResponse::new(envelope.data.unwrap_or(Value::Null))))
    } else {
        Err(ServerError::from_envelope(&envelope))
    }
}

/// GET /api/licitaciones
pub async fn listar(State(state): State<AppState>) -> ServerResult<Json<ToolResponse>> {
    invoke(&state, catalog::LISTAR_LICITACIONES, json!({})).await
}

/// GET /api/licitaciones/:id/<segment> for the single-id tools
pub async fn by_id(state: &AppState, tool: &'static str, id: String) -> ServerResult<Json<ToolResponse>> {
    invoke(state, tool, json!({ "licitacion_id": id })).await
}

/// POST /api/licitaciones/:id/estado
pub async fn cambiar_estado(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CambioEstadoRequest>, JsonRejection>,
) -> ServerResult<Json<ToolResponse>> {
    let Json(request) = body.map_err(|rejection| ServerError::InvalidInput(rejection.body_text()))?;
    invoke(
        &state,
        catalog::CAMBIAR_ESTADO_LICITACION,
        json!({ "licitacion_id": id, "nuevo_estado": request.nuevo_estado }),
    )
    .await
}
