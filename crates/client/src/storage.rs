//! Durable key-value storage slots.
//!
//! Session identity and the pre-payment cart snapshot live in whatever
//! durable storage the host environment offers. Persistence is best-effort
//! by contract: a slot that cannot read or write degrades silently (logged
//! at warn) and never fails the caller, so storage trouble costs at most a
//! fresh session per page load.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// A best-effort string key-value store.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value; `None` when absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    /// Write a value; failures are swallowed.
    fn store(&self, key: &str, value: &str);

    /// Delete a value; failures are swallowed.
    fn remove(&self, key: &str);
}

/// Storage slot backed by one file per key under a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a slot rooted at `dir`. The directory is created on first
    /// write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn store(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!("Storage unavailable, skipping write of {key}: {e}");
            return;
        }
        if let Err(e) = std::fs::write(self.path_for(key), value) {
            tracing::warn!("Failed to persist {key}: {e}");
        }
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.path_for(key));
    }
}

/// In-memory storage slot (tests, single-page lifetime fallback).
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .map(|values| values.get(key).cloned())
            .unwrap_or_default()
    }

    fn store(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("k"), None);

        storage.store("k", "v");
        assert_eq!(storage.load("k").as_deref(), Some("v"));

        storage.remove("k");
        assert_eq!(storage.load("k"), None);
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!(
            "gt-storage-test-{}",
            goal_tickets_core::SessionId::generate()
        ));
        let storage = FileStorage::new(&dir);

        assert_eq!(storage.load("cart_session_id"), None);
        storage.store("cart_session_id", "session_1_abc");
        assert_eq!(storage.load("cart_session_id").as_deref(), Some("session_1_abc"));

        storage.remove("cart_session_id");
        assert_eq!(storage.load("cart_session_id"), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
