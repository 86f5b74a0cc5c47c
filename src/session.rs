//! Session Store
//!
//! Durable home of the session token. One fixed key, three operations.
//! Writes are treated as always succeeding: failures are logged and dropped.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the token is stored under
pub const TOKEN_KEY: &str = "token";

/// Durable storage for the session token
pub trait SessionStore: Send + Sync {
    /// Persist the token, replacing any previous one
    fn save(&self, token: &str);

    /// Remove the persisted token
    fn clear(&self);

    /// Read the persisted token, if any
    fn read(&self) -> Option<String>;
}

/// Session store backed by a small JSON key-value file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Map<String, Value> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to read session file");
                return Map::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = ?self.path, error = %e, "Ignoring malformed session file");
            Map::new()
        })
    }

    fn store(&self, values: &Map<String, Value>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = ?parent, error = %e, "Failed to create session directory");
                return;
            }
        }

        let result = serde_json::to_string_pretty(values)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&self.path, json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!(path = ?self.path, error = %e, "Failed to write session file");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, token: &str) {
        let mut values = self.load();
        values.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.store(&values);
    }

    fn clear(&self) {
        let mut values = self.load();
        if values.remove(TOKEN_KEY).is_some() {
            self.store(&values);
        }
    }

    fn read(&self) -> Option<String> {
        match self.load().remove(TOKEN_KEY) {
            Some(Value::String(token)) if !token.is_empty() => Some(token),
            _ => None,
        }
    }
}

/// In-process session store
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token, as after a previous run
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn read(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.read(), None);

        store.save("tok-1");
        assert_eq!(store.read(), Some("tok-1".to_string()));

        store.save("tok-2");
        assert_eq!(store.read(), Some("tok-2".to_string()));

        store.clear();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileSessionStore::new(&path).save("persisted");
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.read(), Some("persisted".to_string()));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        store.save("abc");
        store.clear();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("theme"));
        assert!(!content.contains("abc"));
    }

    #[test]
    fn test_file_store_keeps_non_string_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"visits":3,"prefs":{"units":"metric"}}"#).unwrap();

        let store = FileSessionStore::new(&path);
        store.save("abc");
        assert_eq!(store.read(), Some("abc".to_string()));
        store.clear();

        let values: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(values["visits"], 3);
        assert_eq!(values["prefs"]["units"], "metric");
        assert!(values.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_store_malformed_file_reads_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.read(), None);

        store.save("fresh");
        assert_eq!(store.read(), Some("fresh".to_string()));
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::with_token("seed");
        assert_eq!(store.read(), Some("seed".to_string()));
        store.clear();
        assert_eq!(store.read(), None);
        store.save("next");
        assert_eq!(store.read(), Some("next".to_string()));
    }
}
