use licitaciones_core::GatewayConfig;
use licitaciones_runtime::Dispatcher;
use licitaciones_server::{serve_unified, ServeConfig, ServerError};
use std::sync::Arc;
use std::time::Duration;

fn dispatcher() -> Arc<Dispatcher> {
    Arc::new(Dispatcher::from_config(&GatewayConfig::new("http://127.0.0.1:1")).unwrap())
}

#[tokio::test]
async fn busy_port_stops_the_unified_server() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        serve_unified(
            dispatcher(),
            ServeConfig {
                rest_addr: Some(addr),
                mcp_stdio: false,
            },
        ),
    )
    .await
    .expect("serve_unified kept running");

    assert!(matches!(result, Err(ServerError::Internal(msg)) if msg.contains("bind")));
}

#[tokio::test]
async fn nothing_to_serve_is_rejected() {
    let result = serve_unified(
        dispatcher(),
        ServeConfig {
            rest_addr: None,
            mcp_stdio: false,
        },
    )
    .await;
    assert!(matches!(result, Err(ServerError::InvalidInput(_))));
}
