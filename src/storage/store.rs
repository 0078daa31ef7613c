use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::OrderFormError;
use crate::form::identity::key_fingerprint;

/// Durable string key/value store, the role `localStorage` plays in a browser.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, OrderFormError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), OrderFormError>;

    fn remove_item(&mut self, key: &str) -> Result<(), OrderFormError>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, OrderFormError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), OrderFormError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), OrderFormError> {
        self.items.remove(key);
        Ok(())
    }
}

// ============================================================================
// File-backed store: one `<sha1(key)>.json` file per key
// ============================================================================

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, OrderFormError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| OrderFormError::StoreIo {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key_fingerprint(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, OrderFormError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(OrderFormError::StoreIo { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), OrderFormError> {
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|source| OrderFormError::StoreIo { path, source })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), OrderFormError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OrderFormError::StoreIo { path, source }),
        }
    }
}
