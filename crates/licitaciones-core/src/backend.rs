use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::types::HttpMethod;

/// Outbound seam between the dispatcher and the remote licitaciones service.
///
/// Implementations issue exactly one request per call: no retries, no caching.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send `method url` with an optional JSON body and return the decoded
    /// JSON response.
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError>;
}
