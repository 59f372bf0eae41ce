use licitaciones_client::HttpBackend;
use licitaciones_core::{
    Backend, GatewayConfig, GatewayError, GatewayResult, HttpMethod, Invocation, ResultEnvelope,
    ToolRegistry,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::error::RuntimeResult;

/// Fully resolved wire request of an invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRequest {
    pub tool: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Translates invocations into backend calls and outcomes into envelopes.
///
/// Holds no mutable state; one instance is shared by every front-end and
/// may be called concurrently.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.registry.base_url())
            .field("tools", &self.registry.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, backend: Arc<dyn Backend>) -> Self {
        Self { registry, backend }
    }

    /// Registry of the twelve licitaciones tools over an [`HttpBackend`]
    pub fn from_config(config: &GatewayConfig) -> RuntimeResult<Self> {
        let registry = ToolRegistry::licitaciones(config)?;
        let backend = HttpBackend::new(config)?;
        Ok(Self::new(Arc::new(registry), Arc::new(backend)))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Resolve an invocation to its wire request without sending it
    pub fn prepare(&self, invocation: &Invocation) -> GatewayResult<PreparedRequest> {
        let tool = self.registry.lookup(&invocation.tool)?;
        let args = tool.args.parse(&invocation.arguments)?;
        let url = tool.resolve_url(&args)?;
        let body = tool.body.map(|shape| shape.build(&args)).transpose()?;

        Ok(PreparedRequest {
            tool: tool.name.to_string(),
            method: tool.method,
            url,
            body,
        })
    }

    async fn execute(&self, invocation: &Invocation) -> GatewayResult<Value> {
        let request = self.prepare(invocation)?;
        let start = Instant::now();
        tracing::debug!(
            tool = %request.tool,
            method = %request.method,
            url = %request.url,
            "sending backend request"
        );

        let result = self
            .backend
            .send(request.method, &request.url, request.body.as_ref())
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(data) => {
                tracing::info!(
                    tool = %request.tool,
                    method = %request.method,
                    url = %request.url,
                    elapsed_ms,
                    "tool invocation completed"
                );
                Ok(data)
            }
            Err(e) => {
                tracing::warn!(
                    tool = %request.tool,
                    method = %request.method,
                    url = %request.url,
                    elapsed_ms,
                    kind = %e.kind(),
                    error = %e,
                    "backend call failed"
                );
                Err(GatewayError::from(e))
            }
        }
    }

    /// Execute one invocation. Never fails: every error becomes a failed
    /// envelope.
    pub async fn dispatch(&self, invocation: Invocation) -> ResultEnvelope {
        match self.execute(&invocation).await {
            Ok(data) => ResultEnvelope::success(data),
            Err(e) => {
                if !e.kind().is_upstream() {
                    tracing::warn!(tool = %invocation.tool, kind = %e.kind(), error = %e, "invocation rejected");
                }
                ResultEnvelope::failure(&e)
            }
        }
    }
}
