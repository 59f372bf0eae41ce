//! REST API module

pub mod handlers;
pub mod router;

pub use router::create_router;

use crate::{AppState, ServerError, ServerResult};
use std::net::SocketAddr;

pub fn parse_addr(addr: &str) -> ServerResult<SocketAddr> {
    addr.parse()
        .map_err(|e| ServerError::InvalidInput(format!("Invalid address '{}': {}", addr, e)))
}

/// Serve REST API
pub async fn serve(app_state: AppState, addr: &str) -> ServerResult<()> {
    let addr = parse_addr(addr)?;
    let app = create_router(app_state);

    tracing::info!("Starting REST API server on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?,
        app,
    )
    .await
    .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
