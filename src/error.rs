//! Error types shared across the crate.
//!
//! Configuration problems and I/O failures are errors; "block missing",
//! "entry already present" and similar negative results are ordinary
//! outcomes carried by the engine's enums, never errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(
        "no group mapped for extension '{extension}' (add it to [mapping] in settings.toml)"
    )]
    UnmappedExtension { extension: String },

    #[error("none of the selected files match a managed extension")]
    NoManagedFiles,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load settings: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("failed to initialize watcher: {reason}")]
    WatchInit { reason: String },

    #[error("invalid watch pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        source: globset::Error,
    },
}

pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// True for errors caused by configuration rather than the filesystem.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SyncError::UnmappedExtension { .. } | SyncError::NoManagedFiles | SyncError::Config(_)
        )
    }
}
