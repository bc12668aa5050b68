//! Diagnostics accumulated during chunking.
//!
//! Recoverable policy fallbacks surface as warnings; unexpected failures at
//! the chunking boundary surface as errors. Diagnostics are returned
//! alongside results as an explicit accumulator value, never threaded
//! through nested calls as a shared mutable list.

use serde::Serialize;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Recoverable policy fallback; the operation continued.
    Warning,
    /// Unexpected failure; the operation produced no result.
    Error,
}

/// A single diagnostic message.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic::warning(message));
    }

    /// Record an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic::error(message));
    }

    /// Merge another collection's entries, preserving order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// All recorded entries in order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Whether any entry is an error.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
