use std::path::PathBuf;

use balance_core::storage::KvStore;
use balance_state::AppStore;
use balance_storage::{key_provider::KeyringProvider, FileStore};
use color_eyre::{eyre::eyre, Result};
use dirs::data_dir;
use tracing::debug;

use crate::config::Config;

pub const DATA_DIR_ENV: &str = "BALANCE_DATA_DIR";
const KEYRING_SERVICE: &str = "balance-cli";
const KEYRING_ACCOUNT: &str = "data-key";

/// Store backing the binary; plain or sealed depending on config.
pub type DynStore = Box<dyn KvStore>;

pub type App = AppStore<DynStore>;

pub fn default_data_dir() -> Result<PathBuf> {
    let base = data_dir().ok_or_else(|| eyre!("no data dir available"))?;
    Ok(base.join("balance"))
}

/// Config wins over `BALANCE_DATA_DIR`, which wins over the platform default.
pub fn resolve_data_dir(config: &Config) -> Result<PathBuf> {
    if let Some(root) = &config.data_dir {
        return Ok(root.clone());
    }
    match std::env::var_os(DATA_DIR_ENV) {
        Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
        _ => default_data_dir(),
    }
}

pub fn store_from_config(config: &Config) -> Result<DynStore> {
    let root = resolve_data_dir(config)?;
    if config.storage.encrypt {
        debug!(?root, "initializing sealed store");
        Ok(Box::new(FileStore::sealed(
            root,
            KeyringProvider::new(KEYRING_SERVICE, KEYRING_ACCOUNT),
        )))
    } else {
        debug!(?root, "initializing plain store");
        Ok(Box::new(FileStore::plain(root)))
    }
}

pub fn open_app(config: &Config) -> Result<App> {
    let kv = store_from_config(config)?;
    AppStore::open(kv).map_err(|e| eyre!("{e:#}"))
}

/// Surface a write-through failure from the last action as a command error.
pub fn ensure_saved<S: KvStore>(app: &mut AppStore<S>) -> Result<()> {
    app.persist_status()
        .map_err(|e| eyre!("changes were not saved: {e}"))
}

#[cfg(test)]
pub fn test_app() -> AppStore<balance_core::storage::InMemoryKvStore> {
    AppStore::open(balance_core::storage::InMemoryKvStore::new()).expect("open in-memory store")
}
