//! Local key-value storage for session state and scan history

mod file_store;
mod io;
mod keys;
mod memory;
mod paths;
mod store;

pub use file_store::FileStore;
pub use io::{atomic_write, read_to_string_if_exists, remove_if_exists};
pub use keys::StorageKey;
pub use memory::MemoryStore;
pub use paths::Paths;
pub use store::{read_json, write_json, Store, StoreError};
