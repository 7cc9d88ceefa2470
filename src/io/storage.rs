use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::io::snapshot::*;
use crate::model::{BackendKind, Board, ThemeMode, View};

/// File used by the structured backend
pub const EXTENSION_FILE: &str = "storage.json";
/// File used by the string-valued backend
pub const LOCAL_FILE: &str = "local_storage.json";

/// Error type for storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("stored boards in {path} are unreadable: {source} (fix the file or run `orbit reset`)")]
    Boards {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A key-value store holding the persisted snapshot.
///
/// Backends are interchangeable: the store reads once at startup and writes
/// after each mutation without knowing which one it talks to.
pub trait Storage {
    /// Read every stored key. Missing or unreadable preference values come
    /// back as `None`; unreadable boards are an error, never a default.
    fn read(&self) -> Result<Snapshot, StorageError>;
    /// Write the present fields of `snapshot`, leaving other keys untouched.
    fn write(&mut self, snapshot: &Snapshot) -> Result<(), StorageError>;
    /// Remove every key.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Open the configured backend rooted at `data_dir`
pub fn open_storage(kind: BackendKind, data_dir: &Path) -> Box<dyn Storage> {
    match kind {
        BackendKind::Extension => Box::new(ExtensionStorage::new(data_dir.join(EXTENSION_FILE))),
        BackendKind::Local => Box::new(LocalStorage::new(data_dir.join(LOCAL_FILE))),
    }
}

// ---------------------------------------------------------------------------
// Structured backend
// ---------------------------------------------------------------------------

/// Stores each key as a structured JSON value in a single object file
#[derive(Debug, Clone)]
pub struct ExtensionStorage {
    path: PathBuf,
}

impl ExtensionStorage {
    pub fn new(path: PathBuf) -> Self {
        ExtensionStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for ExtensionStorage {
    fn read(&self) -> Result<Snapshot, StorageError> {
        let map: Map<String, Value> = read_json_file(&self.path)?;
        Ok(Snapshot {
            boards: map
                .get(KEY_BOARDS)
                .map(|v| decode_boards(&self.path, serde_json::from_value(v.clone())))
                .transpose()?,
            active_board_id: map.get(KEY_ACTIVE).and_then(value_as_id),
            theme: map
                .get(KEY_THEME)
                .and_then(Value::as_str)
                .and_then(ThemeMode::parse),
            view: map.get(KEY_VIEW).and_then(Value::as_str).and_then(View::parse),
            show_tabs_dock: map.get(KEY_SHOW_TABS).map(|v| v != &Value::Bool(false)),
            show_ui_buttons: map.get(KEY_SHOW_UI_BUTTONS).map(|v| v != &Value::Bool(false)),
        })
    }

    fn write(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mut map: Map<String, Value> = read_json_file(&self.path)?;
        if let Some(boards) = &snapshot.boards {
            map.insert(KEY_BOARDS.into(), serde_json::to_value(boards)?);
        }
        if let Some(id) = snapshot.active_board_id {
            map.insert(KEY_ACTIVE.into(), Value::from(id));
        }
        if let Some(theme) = snapshot.theme {
            map.insert(KEY_THEME.into(), Value::from(theme.as_str()));
        }
        if let Some(view) = snapshot.view {
            map.insert(KEY_VIEW.into(), Value::from(view.as_str()));
        }
        if let Some(show) = snapshot.show_tabs_dock {
            map.insert(KEY_SHOW_TABS.into(), Value::Bool(show));
        }
        if let Some(show) = snapshot.show_ui_buttons {
            map.insert(KEY_SHOW_UI_BUTTONS.into(), Value::Bool(show));
        }
        write_json_atomic(&self.path, &map)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        remove_file_if_exists(&self.path)
    }
}

/// Ids were historically stored either as numbers or numeric strings
fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn decode_boards(
    path: &Path,
    decoded: Result<Vec<Board>, serde_json::Error>,
) -> Result<Vec<Board>, StorageError> {
    decoded.map_err(|e| {
        tracing::error!(path = %path.display(), "stored boards are unreadable: {}", e);
        StorageError::Boards {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

// ---------------------------------------------------------------------------
// String-valued backend
// ---------------------------------------------------------------------------

/// Stores every key as a string, the way browser localStorage does:
/// boards as JSON text, ids as decimal text, booleans as "true"/"false".
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: PathBuf) -> Self {
        LocalStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for LocalStorage {
    fn read(&self) -> Result<Snapshot, StorageError> {
        let map: IndexMap<String, String> = read_json_file(&self.path)?;
        let boards = map
            .get(KEY_BOARDS)
            .map(|text| decode_boards(&self.path, serde_json::from_str(text)))
            .transpose()?;
        Ok(Snapshot {
            boards,
            active_board_id: map.get(KEY_ACTIVE).and_then(|s| parse_leading_int(s)),
            theme: map.get(KEY_THEME).and_then(|s| ThemeMode::parse(s)),
            view: map.get(KEY_VIEW).and_then(|s| View::parse(s)),
            show_tabs_dock: map.get(KEY_SHOW_TABS).map(|s| s != "false"),
            show_ui_buttons: map.get(KEY_SHOW_UI_BUTTONS).map(|s| s != "false"),
        })
    }

    fn write(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mut map: IndexMap<String, String> = read_json_file(&self.path)?;
        if let Some(boards) = &snapshot.boards {
            map.insert(KEY_BOARDS.into(), serde_json::to_string(boards)?);
        }
        if let Some(id) = snapshot.active_board_id {
            map.insert(KEY_ACTIVE.into(), id.to_string());
        }
        if let Some(theme) = snapshot.theme {
            map.insert(KEY_THEME.into(), theme.as_str().into());
        }
        if let Some(view) = snapshot.view {
            map.insert(KEY_VIEW.into(), view.as_str().into());
        }
        if let Some(show) = snapshot.show_tabs_dock {
            map.insert(KEY_SHOW_TABS.into(), show.to_string());
        }
        if let Some(show) = snapshot.show_ui_buttons {
            map.insert(KEY_SHOW_UI_BUTTONS.into(), show.to_string());
        }
        write_json_atomic(&self.path, &map)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        remove_file_if_exists(&self.path)
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Non-persistent backend. Counts writes so callers can observe flushes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    snapshot: Snapshot,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-populated snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        MemoryStorage {
            snapshot,
            writes: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Snapshot, StorageError> {
        Ok(self.snapshot.clone())
    }

    fn write(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        self.snapshot.merge(snapshot);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.snapshot = Snapshot::default();
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self) -> Result<Snapshot, StorageError> {
        (**self).read()
    }

    fn write(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        (**self).write(snapshot)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Read a JSON file, treating a missing file as the default value
fn read_json_file<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&text).map_err(|e| StorageError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write pretty JSON through a temp file in the same directory, then rename
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let write_err = |e: std::io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(write_err)?;
    let content = serde_json::to_string_pretty(value)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

fn remove_file_if_exists(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::Write {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
