//! Composition root and session loop for the terminal player.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::services::{IdentityService, PlayDisposition, SessionReconciler};
use crate::config::PlayerConfig;
use crate::infrastructure::messaging::{ConnectionEvent, EventBus};
use crate::infrastructure::platform::FileStorageProvider;
use crate::infrastructure::session_link::UrlSessionLink;
use crate::infrastructure::websocket::{create_connection, Connection};
use crate::ui::{parse_intent, TerminalProjector, UserIntent};

/// How long to wait for the socket to close after leaving a game.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// How a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user asked to leave
    Quit,
    /// The connection closed or failed
    ConnectionEnded,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rpsls_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = PlayerConfig::from_env(std::env::args().nth(1))?;
    tracing::info!(ws_url = %config.ws_url, "Starting RPSLS player");

    let storage = match &config.storage_path {
        Some(path) => FileStorageProvider::at_path(path),
        None => FileStorageProvider::in_config_dir(),
    };
    let user_id = IdentityService::new(storage).get_or_create_identity();
    tracing::debug!(user_id = %user_id, "Player identity loaded");

    let link = UrlSessionLink::from_input(config.session_link.as_deref(), &config.share_base_url)
        .context("Session link could not be parsed")?;

    let notifications = EventBus::new();
    TerminalProjector::attach(&notifications, std::io::stdout());

    let Connection {
        command_bus,
        mut events,
        handle,
        state_observer,
    } = create_connection(config.ws_url.as_str());

    let mut reconciler = SessionReconciler::new(
        user_id,
        Arc::new(command_bus),
        Box::new(link),
        notifications,
    );

    let lines = spawn_stdin_reader();
    let end = tokio::select! {
        end = drive_session(&mut reconciler, &mut events, lines, std::io::stdout()) => end?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            tracing::info!("Received Ctrl+C, leaving game");
            SessionEnd::Quit
        }
    };

    if end == SessionEnd::Quit && state_observer.is_connected() {
        handle.disconnect();
        if !wait_for_close(&mut events, CLOSE_TIMEOUT).await {
            tracing::warn!("Connection did not close within {:?}", CLOSE_TIMEOUT);
        }
    }
    tracing::info!(end = ?end, connection = ?state_observer.state(), "Player stopped");
    Ok(())
}

/// Wait until the connection reports `Closed` or its event stream ends.
///
/// Returns `false` if neither happens within `limit`.
pub async fn wait_for_close(
    events: &mut mpsc::UnboundedReceiver<ConnectionEvent>,
    limit: Duration,
) -> bool {
    let closed = async {
        while let Some(event) = events.recv().await {
            if event == ConnectionEvent::Closed {
                return;
            }
        }
    };
    tokio::time::timeout(limit, closed).await.is_ok()
}

/// Forward stdin lines from a detached thread.
///
/// Blocking reads stay off the runtime so shutdown never waits on the terminal.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Hand connection events and user input to the reconciler, one at a time.
///
/// Returns when the user quits or the connection is gone. Input ending is
/// not fatal; the session keeps reflecting service frames.
pub async fn drive_session<W: Write>(
    reconciler: &mut SessionReconciler,
    events: &mut mpsc::UnboundedReceiver<ConnectionEvent>,
    mut lines: mpsc::UnboundedReceiver<String>,
    mut out: W,
) -> Result<SessionEnd> {
    let mut input_open = true;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    return Ok(SessionEnd::ConnectionEnded);
                };
                let closed = matches!(event, ConnectionEvent::Closed);
                if let Err(e) = reconciler.handle_connection_event(event) {
                    tracing::error!("Session transition failed: {}", e);
                    writeln!(out, "{e}")?;
                }
                if closed {
                    return Ok(SessionEnd::ConnectionEnded);
                }
            }

            line = lines.recv(), if input_open => {
                let Some(line) = line else {
                    tracing::debug!("Input closed");
                    input_open = false;
                    continue;
                };
                match parse_intent(&line) {
                    Ok(None) => {}
                    Ok(Some(UserIntent::Quit)) => return Ok(SessionEnd::Quit),
                    Ok(Some(UserIntent::ShowLink)) => {
                        writeln!(out, "{}", reconciler.share_link())?;
                    }
                    Ok(Some(UserIntent::Play(play))) => match reconciler.request_play(play) {
                        Ok(PlayDisposition::Submitted { .. }) => {}
                        Ok(PlayDisposition::Ignored) => {
                            writeln!(out, "Already played this round, waiting on other player...")?;
                        }
                        Err(e) => writeln!(out, "{e}")?,
                    },
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
        }
    }
}
