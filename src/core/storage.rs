//! Key-value storage substrate backing documents and preferences

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

/// Failure of the storage substrate itself
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not determine data directory")]
    NoDataDir,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage watch failed: {0}")]
    Watch(#[from] notify::Error),
}

/// Per-user persistent key-value storage
///
/// Values are opaque text. A missing key reads as `None`; writes overwrite
/// the previous value whole.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one UTF-8 file per key under the data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Storage rooted at the per-user data directory
    pub fn new() -> Result<Self, StorageError> {
        let dirs =
            ProjectDirs::from("com", "marknote", "Marknote").ok_or(StorageError::NoDataDir)?;
        Ok(Self {
            root: dirs.data_dir().to_path_buf(),
        })
    }

    /// Storage rooted at an explicit directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_root()?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// In-memory storage for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .remove(key);
        Ok(())
    }
}

/// Watches one key of a [`FileStorage`] for out-of-process writes
///
/// Change events arrive on a channel drained by the UI thread; the last
/// writer wins. The app's own writes also surface here and are filtered out
/// by the caller comparing loaded state.
pub struct StorageWatcher {
    rx: mpsc::Receiver<()>,
    _watcher: RecommendedWatcher,
}

impl StorageWatcher {
    pub fn new(storage: &FileStorage, key: &str) -> Result<Self, StorageError> {
        let (tx, rx) = mpsc::channel();
        let target = OsString::from(key);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            if let Ok(event) = res {
                if event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(target.as_os_str()))
                {
                    let _ = tx.send(());
                }
            }
        })?;
        // The directory must exist before it can be watched
        storage.ensure_root()?;
        watcher.watch(storage.root(), RecursiveMode::NonRecursive)?;
        tracing::info!("Watching {} for external changes", storage.root().display());
        Ok(Self {
            rx,
            _watcher: watcher,
        })
    }

    /// True if the watched key changed since the last call
    pub fn take_change(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_root(dir.path());
        assert_eq!(storage.get("absent").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_get_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_root(dir.path());
        storage.set("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
        storage.set("theme", "light").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_file_storage_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_root(dir.path());
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
        // Removing an absent key is not an error
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::default();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::default();
        let other = storage.clone();
        storage.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }
}
