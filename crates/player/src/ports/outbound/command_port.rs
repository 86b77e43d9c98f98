//! Session Command Port - outbound commands to the game service
//!
//! The reconciler hands fully encoded commands to this port. Delivery is
//! fire-and-forget: an `Ok` means the frame was queued for the socket, not
//! that the service received it.

use rpsls_protocol::ClientMessage;

/// Port for sending commands over the single game connection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SessionCommandPort: Send + Sync {
    /// Queue a command for delivery.
    fn send(&self, message: ClientMessage) -> anyhow::Result<()>;
}
