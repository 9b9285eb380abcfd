//! Handled-error audit log
//!
//! Durably records errors that call sites catch and suppress, so operators
//! can diagnose silent failures without those failures ever crashing the
//! process. See `api` for the public surface.

// Internal modules - all access should go through the api module
pub(crate) mod cause;
pub(crate) mod document;
pub(crate) mod error;
pub(crate) mod handle;
pub(crate) mod xml;

// Public API module - the only public interface for the audit log
pub mod api;

#[cfg(test)]
mod tests;
