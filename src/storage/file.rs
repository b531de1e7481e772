// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file backed key-value store.
//!
//! The whole map is rewritten on every change (write to a temp file, then
//! rename), so a crash mid-write leaves the previous state intact.

use super::KeyValueStore;
use crate::error::{AppError, Result};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, String>,
    /// Serializes writes so two writers never interleave temp files.
    flush_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store; an unreadable one is an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let entries = DashMap::new();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let map: BTreeMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
                    AppError::Storage(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                for (k, v) in map {
                    entries.insert(k, v);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        }

        tracing::debug!(path = %path.display(), count = entries.len(), "Opened storage file");
        Ok(Self {
            path,
            entries,
            flush_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.flush_lock
            .lock()
            .map_err(|_| AppError::Storage("Storage lock poisoned".to_string()))
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    fn write(&self, snapshot: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(snapshot)
            .map_err(|e| AppError::Storage(format!("Failed to encode storage: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                tracing::error!(path = %self.path.display(), error = %e, "Storage write failed");
                AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
            })
    }
}

// Changes reach memory only after the file write succeeds.
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.lock()?;
        let mut snapshot = self.snapshot();
        snapshot.insert(key.to_string(), value.clone());
        self.write(&snapshot)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock()?;
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut snapshot = self.snapshot();
        snapshot.remove(key);
        self.write(&snapshot)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("token", "abc".to_string()).unwrap();
        store.set("theme", "dark".to_string()).unwrap();
        store.remove("theme").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
        assert_eq!(reopened.get("theme"), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let err = FileStore::open(&path).err().unwrap();
        assert_eq!(err.code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileStore::open(&path).unwrap();
        store.set("theme", "light".to_string()).unwrap();

        // A non-empty directory at the target makes the rename fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        fs::write(path.join("blocker"), "").unwrap();

        let err = store.set("theme", "dark".to_string()).unwrap_err();
        assert_eq!(err.code(), "STORAGE_ERROR");
        assert_eq!(store.get("theme").as_deref(), Some("light"));

        assert!(store.remove("theme").is_err());
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }
}
