//! File-backed profile storage.
//!
//! Values live in one JSON object on disk and in a shared in-memory copy.
//! Every change rewrites the whole file through a sibling temp file so a crash
//! mid-write never leaves a truncated profile behind.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;

use crate::ports::outbound::StorageProvider;

const STORAGE_FILE: &str = "storage.json";

/// Profile storage persisted as `storage.json` in the per-user config dir
/// (`~/.config/player/` on Linux, `~/Library/Application Support/io.rpsls.player/`
/// on macOS) or at an explicit path.
#[derive(Clone)]
pub struct FileStorageProvider {
    path: Arc<PathBuf>,
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStorageProvider {
    /// Storage in the platform config directory, or the working directory
    /// when no home directory can be determined.
    pub fn in_config_dir() -> Self {
        let path = ProjectDirs::from("io", "rpsls", "player")
            .map(|dirs| dirs.config_dir().join(STORAGE_FILE))
            .unwrap_or_else(|| PathBuf::from(STORAGE_FILE));
        Self::at_path(path)
    }

    /// Storage backed by `path`, loading whatever it already holds.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = read_values(&path);
        tracing::debug!(path = %path.display(), entries = values.len(), "Profile storage opened");

        Self {
            path: Arc::new(path),
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Apply `change` and write the map to disk while still holding the lock.
    fn update(&self, change: impl FnOnce(&mut HashMap<String, String>)) {
        let mut values = match self.values.write() {
            Ok(values) => values,
            Err(poisoned) => poisoned.into_inner(),
        };
        change(&mut values);

        if let Err(e) = write_values(&self.path, &values) {
            tracing::error!(path = %self.path.display(), "Failed to persist profile storage: {}", e);
        }
    }
}

fn read_values(path: &Path) -> HashMap<String, String> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Profile storage unreadable: {}", e);
            return HashMap::new();
        }
    };

    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "Profile storage is not valid JSON: {}", e);
        HashMap::new()
    })
}

fn write_values(path: &Path, values: &HashMap<String, String>) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_vec_pretty(values)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

impl StorageProvider for FileStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        });
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.values.read() {
            Ok(values) => values.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }
}
