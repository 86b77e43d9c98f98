//! Command Bus and Event Bus messaging infrastructure.
//!
//! This module provides the messaging layer around the game connection:
//! - `CommandBus`: Send commands to the service (fire-and-forget)
//! - `EventBus`: Publish session notifications to projectors (push-based subscription)
//! - `ConnectionHandle`/`ConnectionEvent`: Connection lifecycle control and observation
//!
//! The WebSocket bridge (in the websocket module) connects these to the actual transport.

pub mod command_bus;
pub mod connection;
pub mod event_bus;

pub use command_bus::CommandBus;
pub use connection::{
    ConnectionEvent, ConnectionHandle, ConnectionState, ConnectionStateObserver,
    SharedConnectionState,
};
pub use event_bus::EventBus;
