//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with external systems without
//! depending on concrete implementations.

pub mod command_port;
pub mod platform;
pub mod player_events;
pub mod session_link_port;

pub use command_port::SessionCommandPort;
pub use platform::{storage_keys, StorageProvider};
pub use player_events::{InboundEvent, SessionNotification};
pub use session_link_port::SessionLinkPort;

// Re-export mock types when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use command_port::MockSessionCommandPort;
#[cfg(any(test, feature = "testing"))]
pub use session_link_port::MockSessionLinkPort;
