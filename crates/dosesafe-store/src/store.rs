//! The storage interface shared by the session, history and chatbot layers

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::StorageKey;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed value under `{key}`: {source}")]
    Malformed {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for `{key}`: {source}")]
    Encode {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw string storage over typed keys.
///
/// Implementations only move strings around; JSON encoding lives in
/// [`read_json`] and [`write_json`] so a fake store stays trivial.
pub trait Store {
    /// Raw value under `key`, `None` when nothing is stored
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Remove the value under `key`; removing a missing key is not an error
    fn remove(&self, key: StorageKey) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Decode the JSON value under `key`
pub fn read_json<T, S>(store: &S, key: StorageKey) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Malformed { key, source })
}

/// Encode `value` as JSON under `key`
pub fn write_json<T, S>(store: &S, key: StorageKey, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
    store.set(key, &json)
}
