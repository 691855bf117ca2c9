//! Hello/health endpoint contracts as seen by the client, including
//! the hello fetch timeout.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskpad::api::{ApiClient, ApiError, DEFAULT_REQUEST_TIMEOUT};
use taskpad_server::http::{AppState, SERVICE_NAME, start_server};

async fn start_backend() -> ApiClient {
    let (addr, _handle) = start_server("127.0.0.1:0", Arc::new(AppState::new()), &[])
        .await
        .expect("failed to start test server");
    ApiClient::new(
        &format!("http://{addr}"),
        DEFAULT_REQUEST_TIMEOUT,
        Duration::from_secs(5),
    )
    .expect("failed to build client")
}

#[tokio::test]
async fn hello_returns_greeting_with_timestamp() {
    let client = start_backend().await;
    let body = client.hello().await.expect("hello");
    assert_eq!(body.status, "success");
    assert!(body.message.contains("Hello"));
    assert!(body.timestamp <= chrono::Utc::now());
}

#[tokio::test]
async fn health_reports_service_healthy() {
    let client = start_backend().await;
    let body = client.health().await.expect("health");
    assert_eq!(body.status, "healthy");
    assert_eq!(body.service, SERVICE_NAME);
}

#[tokio::test]
async fn hello_times_out_against_unresponsive_server() {
    // A listener that accepts connections but never writes a byte.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = ApiClient::new(
        &format!("http://{addr}"),
        DEFAULT_REQUEST_TIMEOUT,
        Duration::from_millis(200),
    )
    .expect("failed to build client");

    let start = std::time::Instant::now();
    let err = client.hello().await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
    assert_eq!(err.to_string(), "request timed out");
    assert!(
        start.elapsed() < Duration::from_secs(2),
        "hello timeout fired independently of the request timeout"
    );
}

#[tokio::test]
async fn hello_against_dead_port_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = ApiClient::new(
        &format!("http://{addr}"),
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .expect("failed to build client");

    let err = client.hello().await.unwrap_err();
    assert!(
        matches!(err, ApiError::Transport(_)),
        "expected transport error, got {err:?}"
    );
    assert!(err.to_string().starts_with("failed to connect"));
}
