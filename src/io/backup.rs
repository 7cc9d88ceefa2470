use std::fs;
use std::path::{Path, PathBuf};

/// Error type for backup file I/O
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
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
}

/// File name for a backup of the given board: `<name>.json`, with path
/// separators and control characters replaced.
pub fn export_file_name(board_name: &str) -> String {
    let cleaned: String = board_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = cleaned.trim_start_matches('.');
    if stem.is_empty() {
        "board.json".to_string()
    } else {
        format!("{}.json", stem)
    }
}

/// Write backup text to `dir/file_name`, returning the full path
pub fn write_backup(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf, BackupError> {
    let path = dir.join(file_name);
    fs::write(&path, content).map_err(|e| BackupError::Write {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Read a backup file's text
pub fn read_backup(path: &Path) -> Result<String, BackupError> {
    fs::read_to_string(path).map_err(|e| BackupError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}
