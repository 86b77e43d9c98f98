//! Player port definitions.
//!
//! Ports are the seams between the session logic and the outside world
//! (persistent storage, the shareable session link, the transport).

pub mod outbound;
