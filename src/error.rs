use std::path::PathBuf;
use thiserror::Error;

/// Failures at the file boundary (load/save of a record set)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("unsupported file format: {0:?} (expected .json, .csv or .txt)")]
    UnsupportedFormat(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data in {path:?}: {message}")]
    Malformed { path: PathBuf, message: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        StoreError::Malformed {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Errors that abort a cleaning run
#[derive(Error, Debug)]
pub enum CleanError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CleanError>;
