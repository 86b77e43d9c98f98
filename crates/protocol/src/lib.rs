//! RPSLS Protocol - Wire types for Player and game service communication
//!
//! This crate contains the JSON frames exchanged over the WebSocket connection:
//! - `ClientMessage`: commands sent by the player (`new`, `join`, `play`)
//! - `ServerMessage`: the flat, all-optional state frame pushed by the service
//! - `Move`: the closed set of hand gestures
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Lenient inbound** - Unknown inbound fields are ignored

pub mod messages;
pub mod types;

pub use messages::{ClientMessage, ServerMessage};
pub use types::{Move, ParseMoveError};
