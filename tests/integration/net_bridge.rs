//! Wiring tests for the command/event bridge between the TUI loop and
//! the network task: startup greeting, store-update forwarding, and
//! shutdown.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskpad::config::ClientConfig;
use taskpad::net::{NetCommand, NetEvent, spawn_net};
use taskpad_server::http::{AppState, start_server};
use tokio::sync::mpsc;
use tokio::time::timeout;

const EVENT_WAIT: Duration = Duration::from_secs(5);

async fn start_backend() -> std::net::SocketAddr {
    let (addr, _handle) = start_server("127.0.0.1:0", Arc::new(AppState::new()), &[])
        .await
        .expect("failed to start test server");
    addr
}

fn config_for(addr: std::net::SocketAddr) -> ClientConfig {
    ClientConfig {
        server_url: format!("http://{addr}"),
        ..Default::default()
    }
}

async fn recv_event(rx: &mut mpsc::Receiver<NetEvent>) -> NetEvent {
    timeout(EVENT_WAIT, rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

/// Consumes the greeting and the two initial-refresh store updates.
async fn drain_startup(rx: &mut mpsc::Receiver<NetEvent>) {
    for _ in 0..3 {
        let _ = recv_event(rx).await;
    }
}

#[tokio::test]
async fn startup_emits_greeting_then_initial_list() {
    let addr = start_backend().await;
    let (_cmd_tx, mut evt_rx) = spawn_net(&config_for(addr)).expect("spawn net");

    match recv_event(&mut evt_rx).await {
        NetEvent::Greeting { message } => assert!(message.contains("Hello"), "got: {message}"),
        other => panic!("expected greeting, got {other:?}"),
    }

    // Initial refresh: loading flag up, then the (empty) list.
    let NetEvent::Store(first) = recv_event(&mut evt_rx).await else {
        panic!("expected store update");
    };
    assert!(first.loading);
    let NetEvent::Store(second) = recv_event(&mut evt_rx).await else {
        panic!("expected store update");
    };
    assert!(!second.loading);
    assert!(second.tasks.is_empty());
    assert!(second.error.is_none());
}

#[tokio::test]
async fn create_command_round_trips_through_the_store() {
    let addr = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn_net(&config_for(addr)).expect("spawn net");
    drain_startup(&mut evt_rx).await;

    cmd_tx
        .send(NetCommand::Create {
            title: "wired up".to_string(),
            description: "through the bridge".to_string(),
        })
        .await
        .expect("send create");

    let NetEvent::Store(update) = recv_event(&mut evt_rx).await else {
        panic!("expected store update");
    };
    assert_eq!(update.tasks.len(), 1);
    assert_eq!(update.tasks[0].title, "wired up");
    assert_eq!(update.tasks[0].description, "through the bridge");
    assert!(update.error.is_none());
}

#[tokio::test]
async fn failed_command_surfaces_error_in_store_update() {
    let addr = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn_net(&config_for(addr)).expect("spawn net");
    drain_startup(&mut evt_rx).await;

    cmd_tx
        .send(NetCommand::Create {
            title: "   ".to_string(),
            description: String::new(),
        })
        .await
        .expect("send create");

    let NetEvent::Store(update) = recv_event(&mut evt_rx).await else {
        panic!("expected store update");
    };
    assert!(update.tasks.is_empty());
    let error = update.error.expect("error recorded");
    assert!(error.contains("empty"), "got: {error}");
}

#[tokio::test]
async fn shutdown_closes_the_event_channel() {
    let addr = start_backend().await;
    let (cmd_tx, mut evt_rx) = spawn_net(&config_for(addr)).expect("spawn net");
    drain_startup(&mut evt_rx).await;

    cmd_tx
        .send(NetCommand::Shutdown)
        .await
        .expect("send shutdown");

    let closed = timeout(EVENT_WAIT, async {
        while evt_rx.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok(), "event channel never closed after shutdown");
}

#[tokio::test]
async fn unreachable_server_reports_greeting_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let (_cmd_tx, mut evt_rx) = spawn_net(&config_for(addr)).expect("spawn net");

    match recv_event(&mut evt_rx).await {
        NetEvent::GreetingFailed { reason } => {
            assert!(reason.starts_with("failed to connect"), "got: {reason}");
        }
        other => panic!("expected greeting failure, got {other:?}"),
    }

    // The initial refresh fails too and records its error.
    let NetEvent::Store(first) = recv_event(&mut evt_rx).await else {
        panic!("expected store update");
    };
    assert!(first.loading);
    let NetEvent::Store(second) = recv_event(&mut evt_rx).await else {
        panic!("expected store update");
    };
    assert!(second.error.is_some());
}
