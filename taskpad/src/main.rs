//! Taskpad -- terminal client for the task list demo.
//!
//! Launches the TUI, fetches the greeting and task list from the
//! server, and keeps the local list in sync through optimistic
//! updates. Configuration via CLI flags, environment variables, or
//! config file (`~/.config/taskpad/config.toml`).
//!
//! ```bash
//! # Talk to the default server at http://127.0.0.1:8000
//! cargo run --bin taskpad
//!
//! # Point at another server
//! cargo run --bin taskpad -- --server-url http://10.0.0.2:9000
//!
//! # Or via environment variable
//! TASKPAD_SERVER=http://10.0.0.2:9000 cargo run --bin taskpad
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskpad::app::App;
use taskpad::config::{CliArgs, ClientConfig};
use taskpad::net::{self, NetCommand, NetEvent};
use taskpad::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > env > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(server = %config.server_url, "taskpad starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskpad exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskpad.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(config.error_display);

    let (cmd_tx, mut evt_rx) = match net::spawn_net(config) {
        Ok(channels) => channels,
        Err(e) => {
            tracing::error!(error = %e, "failed to start network task");
            return Err(io::Error::other(e.to_string()));
        }
    };

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending NetEvents (non-blocking).
        drain_net_events(&mut app, &mut evt_rx);

        // Step 3: Advance timers (error auto-clear).
        app.tick();

        // Step 4: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(NetCommand) when the user
            // action requires a server round-trip.
            if let Some(net_cmd) = app.handle_key_event(key) {
                match cmd_tx.try_send(net_cmd) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        app.set_error("network busy, action dropped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        app.set_error("network task stopped");
                    }
                }
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(NetCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending `NetEvent`s from the receiver and apply them to the app.
fn drain_net_events(app: &mut App, rx: &mut mpsc::Receiver<NetEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            NetEvent::Store(update) => app.apply_store_update(update),
            NetEvent::Greeting { message } => app.set_greeting(message),
            NetEvent::GreetingFailed { reason } => app.set_greeting_error(reason),
        }
    }
}
