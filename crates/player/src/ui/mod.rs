//! Terminal UI
//!
//! `intent` turns stdin lines into user intents; `projector` renders session
//! notifications as status lines.

pub mod intent;
pub mod projector;

pub use intent::{parse_intent, UserIntent};
pub use projector::{render_notification, TerminalProjector};
