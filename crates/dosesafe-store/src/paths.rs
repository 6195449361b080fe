//! Path resolution for the local data directory

use std::path::{Path, PathBuf};

use crate::StorageKey;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DOSESAFE_HOME";

/// Resolves where persisted client state lives
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve from `DOSESAFE_HOME`, falling back to `~/.dosesafe`
    pub fn new() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(dir)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_root(home.join(".dosesafe")))
    }

    /// Use an explicit data directory
    pub fn with_root(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.data_dir
    }

    /// File holding the value for `key`
    pub fn key_path(&self, key: StorageKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }
}
