use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from orbit.toml (every section optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Which persistence backend holds the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Structured JSON values, one object file
    #[default]
    Extension,
    /// String-only values, browser localStorage semantics
    Local,
}

impl BackendKind {
    pub fn parse(s: &str) -> Option<BackendKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extension" => Some(BackendKind::Extension),
            "local" => Some(BackendKind::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Directory TUI exports are written to (default: current directory)
    #[serde(default)]
    pub export_dir: Option<String>,
    /// Per-key theme color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
