//! File-backed handled-error log handle
//!
//! `ErrorLog` owns the log file exclusively and serializes every
//! load-append-rewrite cycle behind one mutex. The handle has two terminal
//! states: enabled, or disabled when initialization failed. Nothing in this
//! module ever propagates an error to a caller; failures surface as one
//! `log::warn!` each and the call becomes a no-op.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::audit::cause::Cause;
use crate::audit::document::{ErrorLogDocument, ErrorRecord};
use crate::audit::error::{LogError, LogResult};
use crate::core::sync::handle_mutex_poison;

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "handled-errors.xml";

/// Handle to the on-disk handled-error log.
///
/// Obtained from [`ErrorLog::open`]; a handle whose initialization failed is
/// permanently disabled and all its operations are no-ops.
pub struct ErrorLog {
    state: Option<LogState>,
}

struct LogState {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ErrorLog {
    /// Open (or create) the log under `directory`.
    ///
    /// Creates the directory and its parents when missing, then ensures
    /// `handled-errors.xml` exists, writing an empty document when it does
    /// not. An existing file that fails to parse is tolerated; it is
    /// replaced on the next append. On genuine I/O failure this logs one
    /// warning and returns a disabled handle, never an error: callers must
    /// be able to treat logging as a no-op rather than crash.
    pub fn open(directory: impl AsRef<Path>) -> ErrorLog {
        match Self::try_open(directory.as_ref()) {
            Ok(state) => ErrorLog { state: Some(state) },
            Err(err) => {
                log::warn!("Failed to initialize handled-error log: {err}");
                ErrorLog { state: None }
            }
        }
    }

    /// A handle that accepts and discards every record.
    pub fn disabled() -> ErrorLog {
        ErrorLog { state: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    /// Path of the log file, `None` when disabled.
    pub fn path(&self) -> Option<&Path> {
        self.state.as_ref().map(|state| state.path.as_path())
    }

    /// Durably append one record for a caught error.
    ///
    /// No-op when the handle is disabled or `error` is `None`. The full
    /// load-append-rewrite cycle runs under the handle's mutex; a missing or
    /// corrupt on-disk document is silently replaced with a fresh one.
    /// Failures are logged as a warning and swallowed; this call cannot fail
    /// observably.
    pub fn record(&self, source: &str, error: Option<&Cause>) {
        let (state, cause) = match (&self.state, error) {
            (Some(state), Some(cause)) => (state, cause),
            _ => return,
        };

        if let Err(err) = state.append(source, cause) {
            log::warn!("Failed to append handled-error log entry: {err}");
        }
    }

    fn try_open(directory: &Path) -> LogResult<LogState> {
        fs::create_dir_all(directory).map_err(|source| LogError::Io {
            path: directory.to_path_buf(),
            source,
        })?;

        let state = LogState {
            path: directory.join(LOG_FILE_NAME),
            lock: Mutex::new(()),
        };
        state.ensure_document()?;
        Ok(state)
    }
}

impl LogState {
    /// Create the file with an empty root container when absent. An existing
    /// file is probed but never rejected here; corruption heals on the next
    /// append instead of disabling the component.
    fn ensure_document(&self) -> LogResult<()> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                if let Err(err) = ErrorLogDocument::parse(&bytes) {
                    log::debug!(
                        "Existing handled-error log is unreadable and will be replaced on next append: {err}"
                    );
                }
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.write_document(&ErrorLogDocument::empty())
            }
            Err(source) => Err(LogError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn append(&self, source: &str, cause: &Cause) -> LogResult<()> {
        let _guard = handle_mutex_poison(self.lock.lock(), |message| LogError::Lock { message })?;

        let mut document = self.load_or_heal()?;
        document.push(ErrorRecord::capture(source, cause));
        self.write_document(&document)
    }

    /// Load the current on-disk document. A missing file or one that fails
    /// to parse yields a fresh empty document; prior contents are abandoned.
    /// Only a genuine read failure is an error.
    fn load_or_heal(&self) -> LogResult<ErrorLogDocument> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(ErrorLogDocument::empty())
            }
            Err(source) => {
                return Err(LogError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Ok(ErrorLogDocument::parse(&bytes).unwrap_or_else(|_| ErrorLogDocument::empty()))
    }

    /// Truncate and rewrite the whole file from the in-memory document.
    fn write_document(&self, document: &ErrorLogDocument) -> LogResult<()> {
        fs::write(&self.path, document.to_xml()).map_err(|source| LogError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
