//! MCP server over newline-delimited JSON-RPC

use licitaciones_core::{Invocation, ToolDefinition};
use licitaciones_runtime::Dispatcher;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinSet};
use tracing::{debug, error, info, warn};

use crate::{
    jsonrpc::{
        error_response, success_response, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
        RequestId, JSONRPC_VERSION,
    },
    mcp::{
        CancelledNotification, Implementation, InitializeRequest, InitializeResponse,
        ServerCapabilities, Tool, ToolAnnotations, ToolsCallRequest, ToolsCallResponse,
        ToolsCapability, ToolsListRequest, ToolsListResponse, LATEST_PROTOCOL_VERSION,
        METHOD_INITIALIZE, METHOD_PING, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
        NOTIFICATION_CANCELLED, NOTIFICATION_INITIALIZED, SUPPORTED_PROTOCOL_VERSIONS,
    },
    McpError, McpResult,
};

pub const SERVER_NAME: &str = "licitaciones";
const INSTRUCTIONS: &str = "Asistente experto en gestión de licitaciones";

/// One inbound frame after envelope-level validation
#[derive(Debug)]
pub enum Incoming {
    Request(JsonRpcRequest),
    Notification(JsonRpcRequest),
    /// Rejected before dispatch; the response must still be written
    Invalid(JsonRpcResponse),
}

/// MCP Server
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Validate a raw frame as a single JSON-RPC 2.0 message
    pub fn parse_message(body: &[u8]) -> Incoming {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse JSON-RPC message: {}", e);
                return Incoming::Invalid(error_response(
                    None,
                    JsonRpcError::parse_error().with_data(json!({"message": e.to_string()})),
                ));
            }
        };

        // MCP doesn't support batch
        if value.is_array() {
            return Incoming::Invalid(error_response(
                None,
                JsonRpcError::invalid_request()
                    .with_data(json!({"message": "Batch requests are not supported"})),
            ));
        }

        let id = value
            .get("id")
            .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok())
            .filter(|id| *id != RequestId::Null);

        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Incoming::Invalid(error_response(
                    id,
                    JsonRpcError::invalid_request().with_data(json!({"message": e.to_string()})),
                ))
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Incoming::Invalid(error_response(
                request.id,
                JsonRpcError::invalid_request()
                    .with_data(json!({"message": "Invalid JSON-RPC version"})),
            ));
        }

        if request.is_notification() {
            Incoming::Notification(request)
        } else {
            Incoming::Request(request)
        }
    }

    /// Process a single message without cancellation support
    pub async fn process_message(&self, body: &[u8]) -> Option<JsonRpcResponse> {
        match Self::parse_message(body) {
            Incoming::Request(request) => Some(self.handle_request(request).await),
            Incoming::Notification(notification) => {
                self.handle_notification(&notification);
                None
            }
            Incoming::Invalid(response) => Some(response),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        debug!("Processing method: {}", request.method);

        let result = match request.method.as_str() {
            METHOD_INITIALIZE => self.handle_initialize(request.params),
            METHOD_PING => Ok(json!({})),
            METHOD_TOOLS_LIST => self.handle_tools_list(request.params),
            METHOD_TOOLS_CALL => self.handle_tools_call(request.params).await,
            other => {
                return error_response(
                    id,
                    JsonRpcError::method_not_found().with_data(json!({"method": other})),
                )
            }
        };

        match result {
            Ok(result) => success_response(id, result),
            Err(e) => {
                warn!(method = %request.method, error = %e, "request failed");
                error_response(id, e.to_jsonrpc_error())
            }
        }
    }

    /// Notifications other than cancellation carry nothing the server acts on
    pub fn handle_notification(&self, notification: &JsonRpcRequest) {
        match notification.method.as_str() {
            NOTIFICATION_INITIALIZED => debug!("Client initialized"),
            other => debug!("Received notification {}, ignoring", other),
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        let params = params.ok_or_else(|| {
            McpError::InvalidParams("Missing params for initialize".to_string())
        })?;
        let init_request: InitializeRequest = serde_json::from_value(params)?;

        if let Some(client) = &init_request.client_info {
            info!(client = %client.name, version = %client.version, "MCP client connected");
        }

        // Choose protocol version
        let protocol_version =
            if SUPPORTED_PROTOCOL_VERSIONS.contains(&init_request.protocol_version.as_str()) {
                init_request.protocol_version
            } else {
                LATEST_PROTOCOL_VERSION.to_string()
            };

        let response = InitializeResponse {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: Some(false) }),
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("Licitaciones MCP".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };

        Ok(serde_json::to_value(response)?)
    }

    fn handle_tools_list(&self, params: Option<Value>) -> McpResult<Value> {
        let _params: ToolsListRequest = match params {
            Some(Value::Null) | None => ToolsListRequest::default(),
            Some(params) => serde_json::from_value(params)?,
        };

        let tools = self
            .dispatcher
            .registry()
            .tools()
            .map(tool_descriptor)
            .collect();

        Ok(serde_json::to_value(ToolsListResponse { tools, next_cursor: None })?)
    }

    /// Always yields a result: dispatch failures are reported in-band with
    /// `isError`
    async fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let params = params.ok_or_else(|| {
            McpError::InvalidParams("Missing params for tools/call".to_string())
        })?;
        let call_request: ToolsCallRequest = serde_json::from_value(params)?;

        debug!("Calling tool: {}", call_request.name);
        let invocation = Invocation::with_arguments(
            call_request.name,
            call_request.arguments.unwrap_or(Value::Null),
        );
        let envelope = self.dispatcher.dispatch(invocation).await;
        let response = ToolsCallResponse::text(envelope.render_text(), !envelope.success);

        Ok(serde_json::to_value(response)?)
    }
}

fn tool_descriptor(tool: &ToolDefinition) -> Tool {
    Tool {
        name: tool.name.to_string(),
        description: Some(tool.description.clone()),
        input_schema: tool.input_schema(),
        annotations: Some(ToolAnnotations {
            read_only_hint: Some(tool.is_read_only()),
            destructive_hint: Some(!tool.is_read_only()),
            idempotent_hint: Some(true),
            open_world_hint: Some(true),
            ..Default::default()
        }),
    }
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) -> McpResult<()> {
    let line = serde_json::to_string(response)?;
    tx.send(line)
        .map_err(|_| McpError::Internal("output writer closed".to_string()))
}

/// In-flight request tasks keyed by JSON-RPC id. The sequence number tells a
/// finished task apart from a newer one that reused its id.
#[derive(Default)]
struct InFlight {
    next_seq: u64,
    handles: HashMap<RequestId, (u64, AbortHandle)>,
}

impl InFlight {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn insert(&mut self, id: RequestId, seq: u64, handle: AbortHandle) {
        self.handles.insert(id, (seq, handle));
    }

    fn finished(&mut self, id: &RequestId, seq: u64) {
        if matches!(self.handles.get(id), Some((current, _)) if *current == seq) {
            self.handles.remove(id);
        }
    }

    fn cancel(&mut self, params: Option<Value>) {
        let params = params.unwrap_or(Value::Null);
        match serde_json::from_value::<CancelledNotification>(params) {
            Ok(cancelled) => match self.handles.remove(&cancelled.request_id) {
                Some((_, handle)) => {
                    handle.abort();
                    info!(
                        request_id = %cancelled.request_id,
                        reason = cancelled.reason.as_deref().unwrap_or(""),
                        "request cancelled"
                    );
                }
                None => debug!(request_id = %cancelled.request_id, "cancel for unknown or finished request"),
            },
            Err(e) => warn!("Invalid cancellation params: {}", e),
        }
    }
}

/// Serve MCP over an arbitrary byte stream pair.
///
/// Every request runs on its own task; a single writer task emits whole
/// response lines. Frames are read as raw bytes, so a line that is not UTF-8
/// gets a parse error like any other malformed frame. At end of input, or on
/// a read error, the server waits for in-flight requests before returning.
pub async fn serve_io<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> McpResult<()>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(line) = rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut reader = BufReader::new(reader);
    // partial frame survives a select! round that the task set wins
    let mut frame = Vec::new();
    let mut tasks: JoinSet<(RequestId, u64)> = JoinSet::new();
    let mut in_flight = InFlight::default();
    let mut stopped: Option<McpError> = None;

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut frame) => {
                match read {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        stopped = Some(e.into());
                        break;
                    }
                }
                let raw = std::mem::take(&mut frame);
                let line = raw.trim_ascii();
                if line.is_empty() {
                    continue;
                }
                debug!("Processing line: {}", String::from_utf8_lossy(line));

                match McpServer::parse_message(line) {
                    Incoming::Invalid(response) => {
                        if let Err(e) = send(&tx, &response) {
                            stopped = Some(e);
                            break;
                        }
                    }
                    Incoming::Notification(notification) => {
                        if notification.method == NOTIFICATION_CANCELLED {
                            in_flight.cancel(notification.params);
                        } else {
                            server.handle_notification(&notification);
                        }
                    }
                    Incoming::Request(request) => {
                        let id = request.id.clone().unwrap_or(RequestId::Null);
                        let key = id.clone();
                        let seq = in_flight.next_seq();
                        let server = server.clone();
                        let tx = tx.clone();
                        let handle = tasks.spawn(async move {
                            let response = server.handle_request(request).await;
                            if let Err(e) = send(&tx, &response) {
                                error!("Failed to emit response: {}", e);
                            }
                            (key, seq)
                        });
                        in_flight.insert(id, seq, handle);
                    }
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Ok((id, seq)) = joined {
                    in_flight.finished(&id, seq);
                }
            }
        }
    }

    while tasks.join_next().await.is_some() {}
    drop(tx);
    writer_task
        .await
        .map_err(|e| McpError::Internal(format!("writer task failed: {}", e)))??;

    info!("MCP server stopped");
    match stopped {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Serve MCP over stdio
pub async fn serve_stdio(dispatcher: Arc<Dispatcher>) -> McpResult<()> {
    info!(
        tools = dispatcher.registry().len(),
        base_url = %dispatcher.registry().base_url(),
        "Starting licitaciones MCP server (stdio mode)"
    );
    let server = Arc::new(McpServer::new(dispatcher));
    serve_io(server, tokio::io::stdin(), tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonrpc::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
    use licitaciones_core::GatewayConfig;

    fn server() -> McpServer {
        let dispatcher = Dispatcher::from_config(&GatewayConfig::new("http://127.0.0.1:1")).unwrap();
        McpServer::new(Arc::new(dispatcher))
    }

    fn error_code(response: Option<JsonRpcResponse>) -> i32 {
        response.unwrap().error.unwrap().code
    }

    #[tokio::test]
    async fn rejects_malformed_frames() {
        let server = server();
        let resp = server.process_message(b"{not json").await.unwrap();
        assert_eq!(resp.id, None);
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);

        assert_eq!(
            error_code(server.process_message(br#"[{"jsonrpc":"2.0","method":"ping","id":1}]"#).await),
            INVALID_REQUEST
        );
        assert_eq!(
            error_code(server.process_message(br#"{"jsonrpc":"1.0","method":"ping","id":1}"#).await),
            INVALID_REQUEST
        );
        let resp = server
            .process_message(br#"{"jsonrpc":"2.0","id":9}"#)
            .await
            .unwrap();
        assert_eq!(resp.id, Some(RequestId::Number(9)));
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn unknown_method_and_missing_params() {
        let server = server();
        assert_eq!(
            error_code(server.process_message(br#"{"jsonrpc":"2.0","method":"resources/list","id":1}"#).await),
            METHOD_NOT_FOUND
        );
        assert_eq!(
            error_code(server.process_message(br#"{"jsonrpc":"2.0","method":"tools/call","id":2}"#).await),
            INVALID_PARAMS
        );
        assert_eq!(
            error_code(
                server
                    .process_message(br#"{"jsonrpc":"2.0","method":"tools/call","id":3,"params":{"arguments":{}}}"#)
                    .await
            ),
            INVALID_PARAMS
        );
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = server();
        assert!(server
            .process_message(br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn initialize_negotiates_protocol_version() {
        let server = server();
        let resp = server
            .process_message(
                br#"{"jsonrpc":"2.0","method":"initialize","id":1,"params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"adk","version":"1"}}}"#,
            )
            .await
            .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "licitaciones");
        assert!(result["capabilities"]["tools"].is_object());

        let resp = server
            .process_message(br#"{"jsonrpc":"2.0","method":"initialize","id":2,"params":{"protocolVersion":"1999-01-01"}}"#)
            .await
            .unwrap();
        assert_eq!(resp.result.unwrap()["protocolVersion"], LATEST_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn tools_list_publishes_registry() {
        let server = server();
        let resp = server
            .process_message(br#"{"jsonrpc":"2.0","method":"tools/list","id":"a"}"#)
            .await
            .unwrap();
        let result = resp.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 12);
        assert_eq!(tools[0]["name"], "listar_licitaciones");

        let estado = tools
            .iter()
            .find(|t| t["name"] == "cambiar_estado_licitacion")
            .unwrap();
        assert_eq!(
            estado["inputSchema"]["required"],
            json!(["licitacion_id", "nuevo_estado"])
        );
        assert_eq!(estado["annotations"]["readOnlyHint"], false);
        assert_eq!(estado["annotations"]["destructiveHint"], true);
        assert_eq!(tools[0]["annotations"]["readOnlyHint"], true);
        assert_eq!(tools[0]["annotations"]["destructiveHint"], false);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_in_band() {
        let server = server();
        let resp = server
            .process_message(br#"{"jsonrpc":"2.0","method":"tools/call","id":4,"params":{"name":"nonexistent-tool"}}"#)
            .await
            .unwrap();
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error: unknown tool nonexistent-tool");
    }
}
