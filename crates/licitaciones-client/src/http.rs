use async_trait::async_trait;
use licitaciones_core::{Backend, GatewayConfig, HttpMethod, TransportError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

/// reqwest-backed [`Backend`].
///
/// One pooled client is shared by every invocation. The configured timeout
/// covers the whole exchange, from connect to the last body byte.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(config: &GatewayConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let method = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            // .json() also sets Content-Type: application/json
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        self.process_response(response).await
    }

    async fn process_response(&self, response: Response) -> Result<Value, TransportError> {
        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if status.is_client_error() || status.is_server_error() {
            tracing::debug!(status = status.as_u16(), "backend returned failure status");
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body: diagnostic_body(&text),
            });
        }

        if text.trim().is_empty() {
            return Err(TransportError::decode(format!(
                "empty response body (HTTP {})",
                status.as_u16()
            )));
        }
        serde_json::from_str(&text).map_err(|e| TransportError::decode(e.to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout { after: self.timeout }
        } else if error.is_connect() {
            TransportError::network(format!("connection failed: {}", error))
        } else {
            TransportError::network(error.to_string())
        }
    }
}

/// Keep whatever the backend said about the failure: decoded JSON when
/// possible, raw text otherwise.
fn diagnostic_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        match timeout(self.timeout, self.exchange(method, url, body)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout { after: self.timeout }),
        }
    }
}
