//! WebSocket client using tokio-tungstenite

use futures_util::{SinkExt, StreamExt};
use rpsls_protocol::ClientMessage;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::infrastructure::messaging::{ConnectionEvent, ConnectionState, SharedConnectionState};

/// Why a connection stopped pumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEnd {
    /// The local side asked to disconnect
    DisconnectRequested,
    /// The service closed the socket
    ClosedByPeer,
    /// A read or write failed
    TransportError,
}

/// WebSocket client for communicating with the game service
#[derive(Debug, Clone)]
pub struct GameClient {
    url: String,
}

impl GameClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open the socket and pump frames until it ends.
    ///
    /// Reports `Opened`, every inbound text frame, and how the connection
    /// ended on `events`. Outbound commands are taken from `commands` and
    /// written as JSON text frames in order.
    pub async fn run(
        &self,
        commands: &mut mpsc::Receiver<ClientMessage>,
        disconnect: &mut oneshot::Receiver<()>,
        events: &mpsc::UnboundedSender<ConnectionEvent>,
        state: &SharedConnectionState,
    ) -> Result<ConnectionEnd, tokio_tungstenite::tungstenite::Error> {
        state.set(ConnectionState::Connecting);

        let (ws_stream, _) = connect_async(self.url.as_str()).await?;
        tracing::info!(url = %self.url, "Connected to game service");
        state.set(ConnectionState::Connected);
        let _ = events.send(ConnectionEvent::Opened);

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                // Handle disconnect request (or the handle being dropped)
                _ = &mut *disconnect => {
                    tracing::info!("Disconnect requested");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        tracing::debug!("Close frame not sent: {}", e);
                    }
                    let _ = events.send(ConnectionEvent::Closed);
                    return Ok(ConnectionEnd::DisconnectRequested);
                }

                // Handle outgoing commands
                Some(msg) = commands.recv() => {
                    let json = match serde_json::to_string(&msg) {
                        Ok(j) => j,
                        Err(e) => {
                            tracing::error!("Failed to serialize WebSocket message: {}", e);
                            continue;
                        }
                    };
                    tracing::debug!(action = msg.action(), "Sending command");
                    if let Err(e) = write.send(Message::Text(json)).await {
                        tracing::error!("Failed to send message: {}", e);
                        let _ = events.send(ConnectionEvent::Error(e.to_string()));
                        return Ok(ConnectionEnd::TransportError);
                    }
                }

                // Handle incoming frames
                frame = read.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        let _ = events.send(ConnectionEvent::Message(text));
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed connection");
                        let _ = events.send(ConnectionEvent::Closed);
                        return Ok(ConnectionEnd::ClosedByPeer);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        let _ = events.send(ConnectionEvent::Error(e.to_string()));
                        return Ok(ConnectionEnd::TransportError);
                    }
                },
            }
        }
    }
}
