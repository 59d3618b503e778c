//! Store error types.

use crate::core::UnknownCube;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A durable file exists but is not a well-formed table or history
    #[error("Corrupt data in {path:?}: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading, writing, backing up or replacing a file failed
    #[error("I/O failure on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Undo was requested with an empty history
    #[error("Nothing to undo")]
    NothingToUndo,

    /// An observation referenced a cube the table does not hold
    #[error(transparent)]
    UnknownCube(#[from] UnknownCube),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the session can continue after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NothingToUndo | Self::UnknownCube(_))
    }
}
