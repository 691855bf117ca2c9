//! End-to-end CRUD tests: real HTTP client against a real server.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskpad::api::{ApiClient, ApiError, DEFAULT_HELLO_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use taskpad::tasks::TaskApi;
use taskpad_api::task::{CreateTaskRequest, TaskId, UpdateTaskRequest};
use taskpad_server::http::{AppState, start_server};

/// Starts an in-process server and returns a client bound to it.
async fn start_backend() -> ApiClient {
    let (addr, _handle) = start_server("127.0.0.1:0", Arc::new(AppState::new()), &[])
        .await
        .expect("failed to start test server");
    ApiClient::new(
        &format!("http://{addr}"),
        DEFAULT_REQUEST_TIMEOUT,
        DEFAULT_HELLO_TIMEOUT,
    )
    .expect("failed to build client")
}

fn create_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn full_crud_round_trip() {
    let client = start_backend().await;

    let first = client
        .create_task(&create_request("first"))
        .await
        .expect("create first");
    tokio::time::sleep(Duration::from_millis(2)).await;
    let second = client
        .create_task(&CreateTaskRequest {
            title: "second".to_string(),
            description: Some("with body".to_string()),
        })
        .await
        .expect("create second");

    let tasks = client.list_tasks().await.expect("list");
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"], "newest first");
    assert_eq!(tasks[0].description, "with body");

    let renamed = client
        .update_task(
            first.id,
            &UpdateTaskRequest {
                title: Some("renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("rename");
    assert_eq!(renamed.title, "renamed");
    assert_eq!(renamed.created_at, first.created_at);

    client.delete_task(second.id).await.expect("delete");
    let tasks = client.list_tasks().await.expect("list after delete");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, first.id);

    client.delete_all_tasks().await.expect("delete all");
    assert!(client.list_tasks().await.expect("final list").is_empty());
}

#[tokio::test]
async fn create_with_invalid_title_is_validation_error() {
    let client = start_backend().await;
    let err = client
        .create_task(&create_request("   "))
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(message) => {
            assert!(message.contains("empty"), "got: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(client.list_tasks().await.expect("list").is_empty());
}

#[tokio::test]
async fn title_is_trimmed_by_the_server() {
    let client = start_backend().await;
    let task = client
        .create_task(&create_request("  padded  "))
        .await
        .expect("create");
    assert_eq!(task.title, "padded");
}

#[tokio::test]
async fn overlong_title_is_rejected() {
    let client = start_backend().await;
    let err = client
        .create_task(&create_request(&"x".repeat(257)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn update_missing_task_is_not_found() {
    let client = start_backend().await;
    let err = client
        .update_task(TaskId::new(), &UpdateTaskRequest::toggle(true))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test]
async fn delete_missing_task_is_not_found() {
    let client = start_backend().await;
    let err = client.delete_task(TaskId::new()).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test]
async fn toggle_twice_advances_updated_at() {
    let client = start_backend().await;
    let task = client
        .create_task(&create_request("flip me"))
        .await
        .expect("create");

    tokio::time::sleep(Duration::from_millis(2)).await;
    let once = client
        .update_task(task.id, &UpdateTaskRequest::toggle(true))
        .await
        .expect("first toggle");
    assert!(once.completed);
    assert!(once.updated_at > task.updated_at);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let twice = client
        .update_task(task.id, &UpdateTaskRequest::toggle(false))
        .await
        .expect("second toggle");
    assert!(!twice.completed);
    assert!(twice.updated_at > once.updated_at);
}

#[tokio::test]
async fn delete_all_is_idempotent() {
    let client = start_backend().await;
    client
        .create_task(&create_request("doomed"))
        .await
        .expect("create");
    client.delete_all_tasks().await.expect("first clear");
    client.delete_all_tasks().await.expect("second clear");
    assert!(client.list_tasks().await.expect("list").is_empty());
}
