//! Optimistic store behavior against a live server, including
//! rollback when the server disappears mid-session and the
//! two-client delete race.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskpad::api::{ApiClient, DEFAULT_HELLO_TIMEOUT};
use taskpad::tasks::{TaskApi, TaskStore};
use taskpad_api::task::{CreateTaskRequest, UpdateTaskRequest};
use taskpad_server::http::{AppState, start_server};

/// Short request timeout so dead-server tests fail fast.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

async fn start_backend() -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    start_server("127.0.0.1:0", Arc::new(AppState::new()), &[])
        .await
        .expect("failed to start test server")
}

fn client_for(addr: std::net::SocketAddr) -> ApiClient {
    ApiClient::new(
        &format!("http://{addr}"),
        REQUEST_TIMEOUT,
        DEFAULT_HELLO_TIMEOUT,
    )
    .expect("failed to build client")
}

#[tokio::test]
async fn store_reflects_server_after_create_and_refresh() {
    let (addr, _handle) = start_backend().await;
    let mut store = TaskStore::new(client_for(addr));

    store.create("from the store", "").await.expect("create");
    assert_eq!(store.tasks().len(), 1);

    // A second store sees it after refreshing.
    let mut other = TaskStore::new(client_for(addr));
    other.refresh().await.expect("refresh");
    assert_eq!(other.tasks().len(), 1);
    assert_eq!(other.tasks()[0].title, "from the store");
}

#[tokio::test]
async fn update_rolls_back_when_server_dies() {
    let (addr, handle) = start_backend().await;
    let client = client_for(addr);
    let seeded = client
        .create_task(&CreateTaskRequest {
            title: "survivor".to_string(),
            description: None,
        })
        .await
        .expect("seed");

    let mut store = TaskStore::new(client);
    store.refresh().await.expect("refresh");

    handle.abort();
    // Give the listener a moment to actually close.
    tokio::time::sleep(Duration::from_millis(20)).await;

    let err = store
        .update(
            seeded.id,
            UpdateTaskRequest {
                title: Some("never lands".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(
        err.to_string().starts_with("failed to connect") || err.to_string() == "request timed out",
        "got: {err}"
    );
    assert_eq!(store.tasks()[0].title, "survivor", "rolled back");
    assert!(store.error().is_some());
}

#[tokio::test]
async fn delete_rolls_back_when_server_dies() {
    let (addr, handle) = start_backend().await;
    let client = client_for(addr);
    client
        .create_task(&CreateTaskRequest {
            title: "sticky".to_string(),
            description: None,
        })
        .await
        .expect("seed");

    let mut store = TaskStore::new(client);
    store.refresh().await.expect("refresh");
    let id = store.tasks()[0].id;

    handle.abort();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(store.delete(id).await.is_err());
    assert_eq!(store.tasks().len(), 1, "restored after failure");
}

#[tokio::test]
async fn concurrent_delete_of_same_task_is_quiet() {
    let (addr, _handle) = start_backend().await;
    let mut alice = TaskStore::new(client_for(addr));
    let mut bob = TaskStore::new(client_for(addr));

    alice.create("shared", "").await.expect("create");
    bob.refresh().await.expect("refresh");
    let id = bob.tasks()[0].id;

    alice.delete(id).await.expect("alice deletes");
    // Bob's delete hits a 404; the local removal stands with no error.
    bob.delete(id).await.expect("bob deletes");
    assert!(bob.tasks().is_empty());
    assert!(bob.error().is_none());
}

#[tokio::test]
async fn delete_all_failure_preserves_local_view() {
    let (addr, handle) = start_backend().await;
    let mut store = TaskStore::new(client_for(addr));
    store.create("one", "").await.expect("create");
    store.create("two", "").await.expect("create");

    handle.abort();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(store.delete_all().await.is_err());
    assert_eq!(store.tasks().len(), 2, "list untouched on failure");
    assert!(store.error().is_some());
}
