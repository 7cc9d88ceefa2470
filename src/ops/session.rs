use std::path::PathBuf;

use crate::io::config_io::{self, ConfigError};
use crate::io::storage::{Storage, StorageError, open_storage};
use crate::model::{BackendKind, Config};
use crate::ops::clock::SystemClock;
use crate::ops::store::Store;

/// Error type for opening a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Everything a front end needs: where data lives, the parsed config and
/// a loaded store on the configured backend.
pub struct Session {
    pub data_dir: PathBuf,
    pub config: Config,
    pub store: Store<Box<dyn Storage>>,
}

/// Resolve the data directory, read `orbit.toml`, start logging and load
/// the store. `backend` overrides the configured backend.
pub fn open_session(
    data_dir: Option<&str>,
    backend: Option<BackendKind>,
) -> Result<Session, SessionError> {
    let (data_dir, config, storage) = open_backend(data_dir, backend)?;
    let store = Store::load(storage, Box::new(SystemClock::new()))?;
    Ok(Session {
        data_dir,
        config,
        store,
    })
}

/// Open the configured backend without reading it. Used to reset a data
/// directory whose stored boards no longer load.
pub fn open_backend(
    data_dir: Option<&str>,
    backend: Option<BackendKind>,
) -> Result<(PathBuf, Config, Box<dyn Storage>), SessionError> {
    let data_dir = config_io::resolve_data_dir(data_dir)?;
    let config = config_io::read_config(&data_dir)?;
    crate::logging::init(&data_dir);

    let kind = backend.unwrap_or(config.storage.backend);
    tracing::debug!(dir = %data_dir.display(), backend = ?kind, "opening session");
    let storage = open_storage(kind, &data_dir);
    Ok((data_dir, config, storage))
}
