pub mod message_translator;
pub mod messaging;
pub mod platform;
pub mod session_link;
pub mod websocket;

// Re-export messaging types
pub use messaging::{CommandBus, ConnectionEvent, ConnectionState, EventBus};
