//! In-memory platform implementations for tests and ephemeral profiles.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::outbound::StorageProvider;

/// Storage provider backed by a shared in-memory map.
///
/// Clones share the same map, so a clone behaves like the same profile.
#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    values: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<RwLock<usize>>,
}

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls made against this profile.
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|guard| *guard).unwrap_or(0)
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.values.write() {
            guard.insert(key.to_string(), value.to_string());
        }
        if let Ok(mut writes) = self.writes.write() {
            *writes += 1;
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }
}
