//! Crash-safe JSON file replacement.
//!
//! A save stages the new content in a `.tmp` sibling, preserves the current
//! file in the backup location, then renames the staged file over the
//! target. The rename is the only commit point: until it succeeds the target
//! still holds its previous content, and an uncommitted staged write removes
//! its temporary file when dropped.

use super::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Directory, next to the saved file, that holds backups.
pub const DEFAULT_BACKUP_DIR: &str = "backup";

/// Written as the backup when there was no previous file.
const EMPTY_PLACEHOLDER: &str = "{}";

fn with_suffix(path: &Path, suffix: &str) -> OsString {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    name
}

/// `<path>.tmp`
pub fn temp_path(path: &Path) -> PathBuf {
    path.with_file_name(with_suffix(path, ".tmp"))
}

/// `<parent>/<backup_dir>/<file name>.bak`
pub fn backup_path(path: &Path, backup_dir: &str) -> PathBuf {
    path.parent()
        .unwrap_or_else(|| Path::new(""))
        .join(backup_dir)
        .join(with_suffix(path, ".bak"))
}

/// Read and deserialize a JSON file.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value = serde_json::from_str(&json).map_err(|source| StoreError::CorruptData {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("{:<24}{}", "loaded", path.display());
    Ok(value)
}

/// Atomically replace `path` with `value`, backing up to the default location.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    stage(path, &backup_path(path, DEFAULT_BACKUP_DIR), value)?.commit()
}

/// Serialize `value` into the temporary sibling of `target`.
///
/// Nothing at `target` or `backup` is touched until [`StagedWrite::commit`].
pub fn stage<T: Serialize>(target: &Path, backup: &Path, value: &T) -> Result<StagedWrite, StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let staged = StagedWrite {
        target: target.to_path_buf(),
        temp: temp_path(target),
        backup: backup.to_path_buf(),
        committed: false,
    };
    staged.write(json.as_bytes())?;
    log::debug!("{:<24}{}", "staged", staged.temp.display());
    Ok(staged)
}

/// New content written to a temporary file and awaiting commit.
///
/// Dropping it without committing removes the temporary file.
#[derive(Debug)]
#[must_use = "a staged write does nothing until committed"]
pub struct StagedWrite {
    target: PathBuf,
    temp: PathBuf,
    backup: PathBuf,
    committed: bool,
}

impl StagedWrite {
    fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let mut file = File::create(&self.temp).map_err(|e| StoreError::io(&self.temp, e))?;
        file.write_all(bytes)
            .and_then(|()| file.sync_all())
            .map_err(|e| StoreError::io(&self.temp, e))
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn temp(&self) -> &Path {
        &self.temp
    }

    pub fn backup(&self) -> &Path {
        &self.backup
    }

    /// Back up the current target, then rename the staged file over it.
    pub fn commit(self) -> Result<(), StoreError> {
        self.commit_with_receipt().map(drop)
    }

    /// Like [`commit`](Self::commit), but hands back what the backup held
    /// before, so a caller can undo the backup refresh later.
    ///
    /// If the commit itself fails, the backup is put back before returning.
    pub fn commit_with_receipt(mut self) -> Result<BackupReceipt, StoreError> {
        let receipt = BackupReceipt::capture(&self.backup)?;
        let result = self
            .preserve_previous()
            .and_then(|()| fs::rename(&self.temp, &self.target).map_err(|e| StoreError::io(&self.target, e)));
        if let Err(e) = result {
            receipt.restore_or_log();
            return Err(e);
        }
        self.committed = true;
        log::info!("{:<24}{}", "saved", self.target.display());
        Ok(receipt)
    }

    /// Rename the staged file over the target, leaving the backup alone.
    ///
    /// Used to roll the target back without letting the rejected content
    /// become the backup.
    pub fn commit_without_backup(mut self) -> Result<(), StoreError> {
        fs::rename(&self.temp, &self.target).map_err(|e| StoreError::io(&self.target, e))?;
        self.committed = true;
        log::info!("{:<24}{}", "restored", self.target.display());
        Ok(())
    }

    /// Copy rather than move, so the target is never absent.
    fn preserve_previous(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.backup.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }
        if self.target.exists() {
            fs::copy(&self.target, &self.backup).map_err(|e| StoreError::io(&self.backup, e))?;
        } else {
            fs::write(&self.backup, EMPTY_PLACEHOLDER).map_err(|e| StoreError::io(&self.backup, e))?;
        }
        Ok(())
    }
}

/// Backup content as it was before a commit refreshed it.
///
/// Held in memory, so no second file is created next to the backup.
#[derive(Debug)]
#[must_use = "dropping a receipt keeps the refreshed backup"]
pub struct BackupReceipt {
    backup: PathBuf,
    previous: Option<Vec<u8>>,
}

impl BackupReceipt {
    fn capture(backup: &Path) -> Result<Self, StoreError> {
        let previous = match fs::read(backup) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(StoreError::io(backup, e)),
        };
        Ok(Self {
            backup: backup.to_path_buf(),
            previous,
        })
    }

    /// Put the backup back to its content before the commit, removing it
    /// if there was none.
    pub fn restore(self) -> Result<(), StoreError> {
        let result = match &self.previous {
            Some(bytes) => fs::write(&self.backup, bytes),
            None => match fs::remove_file(&self.backup) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        result.map_err(|e| StoreError::io(&self.backup, e))?;
        log::debug!("{:<24}{}", "backup restored", self.backup.display());
        Ok(())
    }

    pub(crate) fn restore_or_log(self) {
        let backup = self.backup.clone();
        if let Err(e) = self.restore() {
            log::error!("could not restore backup {}: {}", backup.display(), e);
        }
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed && self.temp.exists() {
            if let Err(e) = fs::remove_file(&self.temp) {
                log::warn!("could not remove {}: {}", self.temp.display(), e);
            } else {
                log::debug!("{:<24}{}", "discarded", self.temp.display());
            }
        }
    }
}

/// Restore `path` from its backup when the file itself is missing.
///
/// Returns whether a backup was promoted.
pub fn promote_backup(path: &Path, backup: &Path) -> Result<bool, StoreError> {
    if path.exists() || !backup.exists() {
        return Ok(false);
    }
    fs::copy(backup, path).map_err(|e| StoreError::io(path, e))?;
    log::warn!("{} was missing; restored from {}", path.display(), backup.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(temp_path(Path::new("dir/data.json")), PathBuf::from("dir/data.json.tmp"));
        assert_eq!(temp_path(Path::new("data copy.json")), PathBuf::from("data copy.json.tmp"));
    }

    #[test]
    fn backup_path_is_in_sibling_directory() {
        assert_eq!(
            backup_path(Path::new("dir/data.json"), "backup"),
            PathBuf::from("dir/backup/data.json.bak")
        );
        assert_eq!(
            backup_path(Path::new("data.json"), "backup"),
            PathBuf::from("backup/data.json.bak")
        );
    }
}
