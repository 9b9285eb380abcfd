//! Handled-Error Log Error Types

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed log document: {message}")]
    Parse { message: String },

    #[error("Internal synchronisation error: {message}")]
    Lock { message: String },
}

/// Result type for log operations
pub type LogResult<T> = Result<T, LogError>;
