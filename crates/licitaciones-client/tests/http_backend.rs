use httpmock::{
    Method::{GET, POST},
    MockServer,
};
use licitaciones_client::HttpBackend;
use licitaciones_core::{Backend, ErrorKind, GatewayConfig, HttpMethod, TransportError};
use serde_json::json;
use std::time::Duration;

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&GatewayConfig::new(server.base_url())).unwrap()
}

#[tokio::test]
async fn get_sends_identifying_headers_and_decodes_json() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/licitaciones")
            .header("accept", "application/json")
            .header("user-agent", "licitaciones-app/1.0");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{"id": "1"}, {"id": "2"}]));
    });

    let backend = backend_for(&server);
    let data = backend
        .send(HttpMethod::Get, &server.url("/api/licitaciones"), None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(data, json!([{"id": "1"}, {"id": "2"}]));
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/licitaciones/7/estado")
            .header("content-type", "application/json")
            .json_body(json!({"estado": "cerrada"}));
        then.status(200).json_body(json!({"id": "7", "estado": "cerrada"}));
    });

    let backend = backend_for(&server);
    let body = json!({"estado": "cerrada"});
    let data = backend
        .send(
            HttpMethod::Post,
            &server.url("/api/licitaciones/7/estado"),
            Some(&body),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(data["estado"], "cerrada");
}

#[tokio::test]
async fn failure_status_keeps_decoded_body() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/licitaciones/99/completo");
        then.status(404).json_body(json!({"detail": "Licitación no encontrada"}));
    });

    let backend = backend_for(&server);
    let err = backend
        .send(HttpMethod::Get, &server.url("/api/licitaciones/99/completo"), None)
        .await
        .unwrap_err();

    match err {
        TransportError::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, Some(json!({"detail": "Licitación no encontrada"})));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn failure_status_with_plain_text_body() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/licitaciones");
        then.status(503).body("Service Unavailable");
    });

    let backend = backend_for(&server);
    let err = backend
        .send(HttpMethod::Get, &server.url("/api/licitaciones"), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert!(err.to_string().contains("503"));
    assert!(err.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn non_json_success_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/licitaciones/1/correo");
        then.status(200).body("<html>hola</html>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/licitaciones/1/hv");
        then.status(200);
    });

    let backend = backend_for(&server);
    let err = backend
        .send(HttpMethod::Get, &server.url("/api/licitaciones/1/correo"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    let err = backend
        .send(HttpMethod::Get, &server.url("/api/licitaciones/1/hv"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/licitaciones");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(json!([]));
    });

    let config = GatewayConfig::new(server.base_url()).with_timeout(Duration::from_millis(200));
    let backend = HttpBackend::new(&config).unwrap();
    let err = backend
        .send(HttpMethod::Get, &server.url("/api/licitaciones"), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let backend = HttpBackend::new(&GatewayConfig::new("http://127.0.0.1:1")).unwrap();
    let err = backend
        .send(HttpMethod::Get, "http://127.0.0.1:1/api/licitaciones", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
}
