//! File-backed store: one JSON file per key under the data directory

use tracing::debug;

use crate::io::{atomic_write, read_to_string_if_exists, remove_if_exists};
use crate::{Paths, Store, StorageKey, StoreError};

#[derive(Debug, Clone)]
pub struct FileStore {
    paths: Paths,
}

impl FileStore {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// Open the store at the default data directory
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(Paths::new()?))
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }
}

impl Store for FileStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        Ok(read_to_string_if_exists(&self.paths.key_path(key))?)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        let path = self.paths.key_path(key);
        debug!(key = %key, path = %path.display(), bytes = value.len(), "writing stored value");
        atomic_write(&path, value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        debug!(key = %key, "removing stored value");
        Ok(remove_if_exists(&self.paths.key_path(key))?)
    }
}
