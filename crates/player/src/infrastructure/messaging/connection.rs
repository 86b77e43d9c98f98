//! Connection lifecycle types: what the connection task reports, the state it
//! publishes, and how the owner asks it to stop.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

/// Something the connection observed, delivered in order to the session runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The socket is open and commands can be sent
    Opened,
    /// A raw text frame arrived
    Message(String),
    /// The transport failed; no recovery is attempted
    Error(String),
    /// The peer or the local side closed the connection
    Closed,
}

/// Transport state of the single game connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
    /// The last attempt failed and will not be retried
    Failed = 3,
}

impl From<u8> for ConnectionState {
    fn from(raw: u8) -> Self {
        match raw {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            3 => ConnectionState::Failed,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// Connection state shared between the connection task and its observers.
#[derive(Debug, Clone)]
pub struct SharedConnectionState(Arc<AtomicU8>);

impl Default for SharedConnectionState {
    fn default() -> Self {
        Self(Arc::new(AtomicU8::new(ConnectionState::Disconnected as u8)))
    }
}

impl SharedConnectionState {
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from(self.0.load(Ordering::SeqCst))
    }

    pub fn set(&self, state: ConnectionState) {
        let previous = ConnectionState::from(self.0.swap(state as u8, Ordering::SeqCst));
        if previous != state {
            tracing::debug!(from = ?previous, to = ?state, "Connection state changed");
        }
    }
}

/// Owner's control over the connection.
///
/// Dropping the handle also stops the connection task.
pub struct ConnectionHandle {
    disconnect_tx: oneshot::Sender<()>,
}

impl ConnectionHandle {
    pub fn new(disconnect_tx: oneshot::Sender<()>) -> Self {
        Self { disconnect_tx }
    }

    /// Ask the connection task to close the socket.
    ///
    /// A `Closed` event follows once the socket is shut.
    pub fn disconnect(self) {
        if self.disconnect_tx.send(()).is_err() {
            tracing::debug!("Connection task already gone");
        }
    }
}

/// Read-only view of the connection state.
#[derive(Debug, Clone)]
pub struct ConnectionStateObserver {
    state: SharedConnectionState,
}

impl ConnectionStateObserver {
    pub fn new(state: SharedConnectionState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }
}
