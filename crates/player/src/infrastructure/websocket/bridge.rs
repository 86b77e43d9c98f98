//! WebSocket Bridge - connects the CommandBus and connection events to the GameClient.
//!
//! `create_connection` sets up:
//! - A CommandBus for sending commands
//! - A receiver of `ConnectionEvent`s (open / message / error / closed)
//! - A background task that pumps these through the WebSocket transport

use rpsls_protocol::ClientMessage;
use tokio::sync::{mpsc, oneshot};

use super::client::{ConnectionEnd, GameClient};
use super::core::{NeverReconnect, ReconnectPolicy};
use crate::infrastructure::messaging::{
    CommandBus, ConnectionEvent, ConnectionHandle, ConnectionState, ConnectionStateObserver,
    SharedConnectionState,
};

/// Outbound queue depth between the CommandBus and the socket writer.
const COMMAND_QUEUE_DEPTH: usize = 32;

/// Result of creating a connection.
///
/// Contains all the pieces needed to use the connection:
/// - `command_bus`: Send commands to the service
/// - `events`: Connection lifecycle events and raw inbound frames, in order
/// - `handle`: Control connection lifecycle
/// - `state_observer`: Observe connection state
pub struct Connection {
    pub command_bus: CommandBus,
    pub events: mpsc::UnboundedReceiver<ConnectionEvent>,
    pub handle: ConnectionHandle,
    pub state_observer: ConnectionStateObserver,
}

/// Open the single game connection with the default no-retry policy.
///
/// Must be called from within a tokio runtime.
pub fn create_connection(url: &str) -> Connection {
    create_connection_with_policy(url, NeverReconnect)
}

/// Open the game connection, consulting `policy` whenever it ends.
pub fn create_connection_with_policy(url: &str, policy: impl ReconnectPolicy) -> Connection {
    // Create channels
    let (cmd_tx, cmd_rx) = mpsc::channel::<ClientMessage>(COMMAND_QUEUE_DEPTH);
    let (disconnect_tx, disconnect_rx) = oneshot::channel::<()>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ConnectionEvent>();

    let state = SharedConnectionState::default();
    let command_bus = CommandBus::new(cmd_tx);
    let state_observer = ConnectionStateObserver::new(state.clone());

    // Spawn bridge task
    let client = GameClient::new(url);

    tokio::spawn(async move {
        bridge_task(
            client,
            cmd_rx,
            disconnect_rx,
            event_tx,
            state,
            policy,
        )
        .await;
    });

    let handle = ConnectionHandle::new(disconnect_tx);

    Connection {
        command_bus,
        events: event_rx,
        handle,
        state_observer,
    }
}

async fn bridge_task(
    client: GameClient,
    mut cmd_rx: mpsc::Receiver<ClientMessage>,
    mut disconnect_rx: oneshot::Receiver<()>,
    events: mpsc::UnboundedSender<ConnectionEvent>,
    state: SharedConnectionState,
    mut policy: impl ReconnectPolicy,
) {
    let mut attempt = 0u32;

    loop {
        match client
            .run(&mut cmd_rx, &mut disconnect_rx, &events, &state)
            .await
        {
            Ok(ConnectionEnd::DisconnectRequested) => {
                state.set(ConnectionState::Disconnected);
                return;
            }
            Ok(ConnectionEnd::ClosedByPeer) => {
                state.set(ConnectionState::Disconnected);
            }
            Ok(ConnectionEnd::TransportError) => {
                state.set(ConnectionState::Failed);
            }
            Err(e) => {
                tracing::error!(url = %client.url(), "Failed to connect to game service: {}", e);
                let _ = events.send(ConnectionEvent::Error(e.to_string()));
                state.set(ConnectionState::Failed);
            }
        }

        attempt += 1;
        let Some(delay) = policy.next_delay(attempt) else {
            tracing::info!("Connection ended; not reconnecting");
            return;
        };
        tracing::info!(attempt, delay_ms = delay.as_millis() as u64, "Reconnecting");
        tokio::time::sleep(delay).await;
    }
}
