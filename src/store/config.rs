//! File locations used by a store.

use super::atomic::{backup_path, DEFAULT_BACKUP_DIR};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Prefix that turns a data file name into its history file name.
pub const HISTORY_PREFIX: &str = "changes_";

/// Where a store keeps its data, history and backups.
///
/// # Example
///
/// ```rust
/// use cubetally::store::StoreConfig;
/// use std::path::PathBuf;
///
/// let config = StoreConfig::new("runs/data.json");
/// assert_eq!(config.history_path, PathBuf::from("runs/changes_data.json"));
/// assert_eq!(config.data_backup(), PathBuf::from("runs/backup/data.json.bak"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_path: PathBuf,
    pub history_path: PathBuf,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

fn default_backup_dir() -> String {
    DEFAULT_BACKUP_DIR.to_string()
}

impl StoreConfig {
    /// Derive the history path (`changes_<name>` alongside) from the data path.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        let data_path = data_path.into();
        let history_path = history_path_for(&data_path);
        Self {
            data_path,
            history_path,
            backup_dir: default_backup_dir(),
        }
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    pub fn with_backup_dir(mut self, dir: impl Into<String>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    pub fn data_backup(&self) -> PathBuf {
        backup_path(&self.data_path, &self.backup_dir)
    }

    pub fn history_backup(&self) -> PathBuf {
        backup_path(&self.history_path, &self.backup_dir)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

fn history_path_for(data_path: &Path) -> PathBuf {
    let mut name = OsString::from(HISTORY_PREFIX);
    if let Some(file_name) = data_path.file_name() {
        name.push(file_name);
    }
    data_path.with_file_name(name)
}
