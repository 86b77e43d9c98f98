//! RPSLS player crate.
//!
//! Client for a two-player rock-paper-scissors-lizard-spock service: a stable
//! local identity, one WebSocket connection, and a session reconciler that
//! turns service frames into local game state.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod session_types;
pub mod ui;
