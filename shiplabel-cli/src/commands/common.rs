//! Store and configuration helpers shared across commands.

use std::path::{Path, PathBuf};

use shiplabel::config::ConfigFile;
use shiplabel::store::{InMemoryStore, StoreSnapshot};

use crate::error::CliError;

/// Load the configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Snapshot file to work on: the command line wins over the config.
pub fn resolve_snapshot(cli: Option<PathBuf>, config: &ConfigFile) -> Result<PathBuf, CliError> {
    cli.or_else(|| config.store.snapshot.clone()).ok_or_else(|| {
        CliError::Config(
            "No store snapshot given. Use --snapshot or set store.snapshot in config.ini"
                .to_string(),
        )
    })
}

pub fn open_store(path: &Path) -> Result<InMemoryStore, CliError> {
    Ok(InMemoryStore::from_snapshot(StoreSnapshot::load(path)?))
}

pub fn save_store(store: &InMemoryStore, path: &Path) -> Result<(), CliError> {
    store.snapshot().save(path)?;
    Ok(())
}
