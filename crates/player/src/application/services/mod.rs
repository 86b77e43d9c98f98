//! Application services
//!
//! This module contains application services that implement use cases
//! for the RPSLS Player. Services depend on port traits, not concrete
//! infrastructure implementations.

pub mod identity_service;
pub mod session_service;

pub use identity_service::IdentityService;
pub use session_service::{PlayDisposition, SessionError, SessionReconciler};
