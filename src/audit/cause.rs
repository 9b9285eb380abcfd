//! Snapshot of a caught error and its cause chain
//!
//! Call sites that catch and suppress an error report it to the log as a
//! `Cause`: the error's kind, its message, optional frames describing where
//! it was raised, and the chain of underlying causes. The snapshot is taken
//! at the catch site so the log never holds live error values.

use std::error::Error;

/// What the audit log records about one caught error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    kind: String,
    message: String,
    frames: Vec<String>,
    caused_by: Option<Box<Cause>>,
}

impl Cause {
    /// Create a cause with an explicit kind and message.
    ///
    /// Used at collaborator boundaries where no `std::error::Error` value
    /// exists, e.g. when reporting a failure described only by text.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            frames: Vec::new(),
            caused_by: None,
        }
    }

    /// Snapshot a live error, walking its `source()` chain.
    ///
    /// The kind is the error's fully-qualified Rust type name. Chained
    /// causes are type-erased behind `dyn Error`, so they carry only their
    /// display text.
    pub fn of<E: Error + ?Sized>(error: &E) -> Self {
        Self {
            kind: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            frames: Vec::new(),
            caused_by: error.source().map(|cause| Box::new(Self::from_dyn(cause))),
        }
    }

    fn from_dyn(error: &(dyn Error + 'static)) -> Self {
        Self {
            kind: String::new(),
            message: error.to_string(),
            frames: Vec::new(),
            caused_by: error.source().map(|cause| Box::new(Self::from_dyn(cause))),
        }
    }

    /// Attach a frame describing where the error surfaced, outermost first.
    pub fn frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    /// Attach the next underlying cause in the chain.
    pub fn caused_by(mut self, cause: Cause) -> Self {
        // Append at the end of the existing chain so builder order matches
        // cause order.
        let mut tail = &mut self.caused_by;
        while let Some(existing) = tail {
            tail = &mut existing.caused_by;
        }
        *tail = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line description, `kind: message` when both are present.
    pub(crate) fn describe(&self) -> String {
        match (self.kind.is_empty(), self.message.is_empty()) {
            (true, _) => self.message.clone(),
            (false, true) => self.kind.clone(),
            (false, false) => format!("{}: {}", self.kind, self.message),
        }
    }

    /// Render the full trace text: description and frames of this cause,
    /// then each chained cause introduced by `Caused by:`.
    pub(crate) fn render_trace(&self) -> String {
        let mut out = String::new();
        self.render_section(&mut out, None);
        let mut next = self.caused_by.as_deref();
        while let Some(cause) = next {
            cause.render_section(&mut out, Some("Caused by: "));
            next = cause.caused_by.as_deref();
        }
        out
    }

    fn render_section(&self, out: &mut String, prefix: Option<&str>) {
        if let Some(prefix) = prefix {
            out.push_str(prefix);
        }
        out.push_str(&self.describe());
        out.push('\n');
        for frame in &self.frames {
            out.push_str("    at ");
            out.push_str(frame);
            out.push('\n');
        }
    }
}
