use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "orbit.toml";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "ORBIT_DIR";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no data directory: pass --data-dir or set ORBIT_DIR or HOME")]
    NoDataDir,
}

/// Resolve the data directory: explicit flag, then $ORBIT_DIR, then ~/.orbit
pub fn resolve_data_dir(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(|home| PathBuf::from(home).join(".orbit"))
        .ok_or(ConfigError::NoDataDir)
}

/// Read orbit.toml from the data directory. A missing file yields defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BackendKind;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.storage.backend, BackendKind::Extension);
        assert!(config.ui.export_dir.is_none());
    }

    #[test]
    fn reads_backend_and_colors() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r##"[storage]
backend = "local"

[ui]
export_dir = "/tmp/exports"

[ui.colors]
highlight = "#112233"
"##,
        )
        .unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.storage.backend, BackendKind::Local);
        assert_eq!(config.ui.export_dir.as_deref(), Some("/tmp/exports"));
        assert_eq!(config.ui.colors.get("highlight").map(String::as_str), Some("#112233"));
    }

    #[test]
    fn bad_backend_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[storage]\nbackend = \"cloud\"\n").unwrap();
        assert!(matches!(
            read_config(dir.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some("/tmp/orbit-explicit")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/orbit-explicit"));
    }
}
