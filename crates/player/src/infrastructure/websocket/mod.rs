//! WebSocket client for the game service connection
//!
//! - `client`: tokio-tungstenite socket pump for a single connection
//! - `bridge`: wires the socket to the CommandBus and the connection event stream
//! - `core`: runtime-free policy types (reconnect decisions)
//! - `message_builder`: outbound command construction

mod bridge;
mod client;
mod core;
mod message_builder;

pub use bridge::{create_connection, create_connection_with_policy, Connection};
pub use client::{ConnectionEnd, GameClient};
pub use core::{NeverReconnect, ReconnectPolicy};
pub use message_builder::{ClientMessageBuilder, EncodeError};
