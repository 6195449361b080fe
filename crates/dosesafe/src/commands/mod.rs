pub mod chat;
pub mod health;
pub mod history;
pub mod interactions;
pub mod metrics;
pub mod render;
pub mod results;
pub mod scan;
pub mod session;
pub mod version;

use std::path::PathBuf;

use dosesafe_client::ApiClient;
use dosesafe_core::{Config, ScanHistory, SessionManager, User};
use dosesafe_store::{FileStore, Paths};
use tracing::debug;

/// Everything a command needs: the local store and service settings
pub struct Context {
    pub store: FileStore,
    pub config: Config,
}

impl Context {
    pub fn new(api_url: Option<&str>, data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let store = match data_dir {
            Some(dir) => FileStore::new(Paths::with_root(dir)),
            None => FileStore::open_default()?,
        };
        let config = match api_url {
            Some(url) => Config::from_env().with_api_url(url),
            None => Config::from_env(),
        };
        debug!(
            data_dir = %store.paths().root().display(),
            api_url = %config.api_url,
            "opening context"
        );
        Ok(Self { store, config })
    }

    pub fn session(&self) -> SessionManager<&FileStore> {
        SessionManager::new(&self.store)
    }

    pub fn history(&self) -> ScanHistory<&FileStore> {
        ScanHistory::with_limit(&self.store, self.config.history_limit)
    }

    pub fn client(&self) -> anyhow::Result<ApiClient> {
        Ok(ApiClient::new(self.config.clone())?)
    }

    /// Guard for commands that need a signed-in user
    pub fn require_user(&self) -> anyhow::Result<User> {
        Ok(self.session().require_user()?)
    }
}

#[cfg(test)]
pub(crate) fn test_context(dir: &std::path::Path) -> Context {
    Context {
        store: FileStore::new(Paths::with_root(dir)),
        // Nothing listens on port 9; network calls fail fast
        config: Config::new().with_api_url("http://127.0.0.1:9"),
    }
}
