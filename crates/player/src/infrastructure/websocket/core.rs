//! Platform-agnostic policy for the game connection.
//!
//! No runtime dependencies here. The bridge asks the
//! policy what to do after a connection ends; the session state machine never
//! sees these decisions.

use std::time::Duration;

/// Decides whether, and after how long, a finished connection is re-opened.
pub trait ReconnectPolicy: Send + 'static {
    /// Delay before attempt number `attempt` (1-based), or `None` to stop.
    fn next_delay(&mut self, attempt: u32) -> Option<Duration>;
}

/// The connection is single-shot: once it ends, it stays down.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverReconnect;

impl ReconnectPolicy for NeverReconnect {
    fn next_delay(&mut self, _attempt: u32) -> Option<Duration> {
        None
    }
}
