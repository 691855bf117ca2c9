//! Bridge between the synchronous TUI loop and the async API.
//!
//! The UI thread sends [`NetCommand`]s and drains [`NetEvent`]s each
//! frame; a background task owns the [`TaskStore`] and executes
//! commands serially. Store updates are forwarded as they happen, so
//! optimistic intermediate states reach the UI while a request is
//! still in flight.

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::tasks::{StoreUpdate, TaskStore};
use taskpad_api::task::{TaskId, UpdateTaskRequest};

/// Bounded channel capacity for commands and events.
const CHANNEL_CAPACITY: usize = 256;

/// Commands the UI sends to the network task.
#[derive(Debug)]
pub enum NetCommand {
    /// Re-fetch the task list from the server.
    Refresh,
    /// Create a task.
    Create {
        /// Task title, already validated by the form.
        title: String,
        /// Task description, may be empty.
        description: String,
    },
    /// Update a task's title and description.
    Update {
        /// Target task.
        id: TaskId,
        /// New title.
        title: String,
        /// New description.
        description: String,
    },
    /// Flip a task's completion state.
    Toggle {
        /// Target task.
        id: TaskId,
    },
    /// Delete a task.
    Delete {
        /// Target task.
        id: TaskId,
    },
    /// Delete every task.
    DeleteAll,
    /// Stop the network task.
    Shutdown,
}

/// Events the network task sends to the UI.
#[derive(Debug)]
pub enum NetEvent {
    /// The task store changed.
    Store(StoreUpdate),
    /// The startup greeting arrived.
    Greeting {
        /// Greeting message from the server.
        message: String,
    },
    /// The startup greeting could not be fetched.
    GreetingFailed {
        /// Human-readable reason, shown in the header.
        reason: String,
    },
}

/// Spawns the network task and returns the command/event channels.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn spawn_net(
    config: &ClientConfig,
) -> Result<(mpsc::Sender<NetCommand>, mpsc::Receiver<NetEvent>), crate::api::ApiError> {
    let client = ApiClient::new(
        &config.server_url,
        config.request_timeout,
        config.hello_timeout,
    )?;
    let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (evt_tx, evt_rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(command_handler(client, cmd_rx, evt_tx));
    Ok((cmd_tx, evt_rx))
}

/// Executes commands against the store until shutdown.
///
/// On startup fetches the greeting and the initial task list before
/// entering the command loop. Operation errors are not returned here;
/// they travel to the UI inside [`StoreUpdate`]s.
async fn command_handler(
    client: ApiClient,
    mut cmd_rx: mpsc::Receiver<NetCommand>,
    evt_tx: mpsc::Sender<NetEvent>,
) {
    let hello_client = client.clone();
    let mut store = TaskStore::new(client);
    let mut store_rx = store.watch();

    // Forward store updates as they are emitted, so optimistic states
    // are visible while the triggering request is still in flight.
    let forward_tx = evt_tx.clone();
    tokio::spawn(async move {
        while let Some(update) = store_rx.recv().await {
            if forward_tx.send(NetEvent::Store(update)).await.is_err() {
                break;
            }
        }
    });

    let greeting = match hello_client.hello().await {
        Ok(body) => NetEvent::Greeting {
            message: body.message,
        },
        Err(e) => {
            tracing::warn!(error = %e, "hello fetch failed");
            NetEvent::GreetingFailed {
                reason: e.to_string(),
            }
        }
    };
    if evt_tx.send(greeting).await.is_err() {
        return;
    }

    if let Err(e) = store.refresh().await {
        tracing::warn!(error = %e, "initial refresh failed");
    }

    while let Some(cmd) = cmd_rx.recv().await {
        let result = match cmd {
            NetCommand::Refresh => store.refresh().await,
            NetCommand::Create { title, description } => {
                store.create(&title, &description).await
            }
            NetCommand::Update {
                id,
                title,
                description,
            } => {
                store
                    .update(
                        id,
                        UpdateTaskRequest {
                            title: Some(title),
                            description: Some(description),
                            completed: None,
                        },
                    )
                    .await
            }
            NetCommand::Toggle { id } => store.toggle(id).await,
            NetCommand::Delete { id } => store.delete(id).await,
            NetCommand::DeleteAll => store.delete_all().await,
            NetCommand::Shutdown => {
                tracing::info!("network task shutting down");
                break;
            }
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "operation failed");
        }
    }
}
