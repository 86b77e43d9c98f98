//! Identity service - stable player id across restarts
//!
//! The service connection id changes on every reconnect, so the player is
//! identified by a token generated once per profile and kept in storage.

use crate::ports::outbound::{storage_keys, StorageProvider};
use crate::session_types::PlayerIdentity;

/// Reads, and on first use creates, the persisted player identity.
#[derive(Clone)]
pub struct IdentityService<S: StorageProvider> {
    storage: S,
}

impl<S: StorageProvider> IdentityService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Return the persisted identity, generating and saving one if absent.
    pub fn get_or_create_identity(&self) -> PlayerIdentity {
        if let Some(existing) = self
            .storage
            .load(storage_keys::USER_ID)
            .filter(|value| !value.is_empty())
        {
            return PlayerIdentity::new(existing);
        }

        let identity = PlayerIdentity::generate(&mut rand::thread_rng());
        self.storage.save(storage_keys::USER_ID, identity.as_str());
        tracing::info!(user_id = %identity, "Created new player identity");
        identity
    }
}
