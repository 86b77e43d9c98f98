//! Command Bus for sending messages to the game service.
//!
//! The CommandBus is the write side of the single connection. Sends are
//! fire-and-forget: a message is queued for the writer task and never
//! acknowledged, retried or buffered beyond the channel.

use anyhow::Result;
use rpsls_protocol::ClientMessage;
use tokio::sync::mpsc;

use crate::ports::outbound::SessionCommandPort;

/// Command bus for sending messages to the game service.
///
/// This is a concrete struct that can be cloned and shared.
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::Sender<ClientMessage>,
}

impl CommandBus {
    /// Create a new CommandBus with the given channel sender.
    pub fn new(tx: mpsc::Sender<ClientMessage>) -> Self {
        Self { tx }
    }

    /// Send a fire-and-forget command.
    ///
    /// Returns immediately after queueing the message. Fails if the writer
    /// task is gone (connection failed or closed) or the queue is full.
    pub fn send(&self, message: ClientMessage) -> Result<()> {
        self.tx
            .try_send(message)
            .map_err(|e| anyhow::anyhow!("CommandBus send failed: {}", e))
    }
}

impl SessionCommandPort for CommandBus {
    fn send(&self, message: ClientMessage) -> Result<()> {
        CommandBus::send(self, message)
    }
}
