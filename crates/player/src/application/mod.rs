//! Application layer: session use cases built on the outbound ports.

pub mod services;
