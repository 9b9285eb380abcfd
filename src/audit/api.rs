//! Public API for the handled-error audit log
//!
//! External modules should import from here rather than directly from
//! internal modules. The collaborator surface is deliberately narrow:
//! [`ErrorLog::open`] and [`ErrorLog::record`]; everything else exists for
//! inspection and tests.
//!
//! # Examples
//! ```no_run
//! use handled_errors::audit::api::{Cause, ErrorLog};
//!
//! let log = ErrorLog::open("plugin-data");
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
//! log.record("Bridge:onChat", Some(&Cause::of(&err)));
//! ```

pub use crate::audit::cause::Cause;
pub use crate::audit::document::{ErrorLogDocument, ErrorRecord, ENTRY_ELEMENT, ROOT_ELEMENT};
pub use crate::audit::error::{LogError, LogResult};
pub use crate::audit::handle::{ErrorLog, LOG_FILE_NAME};
