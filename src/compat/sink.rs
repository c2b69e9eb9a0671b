//! Destinations for insufficient-version warnings.
//!
//! Diagnostics are observational: a sink records or reports them but never
//! turns them into failures.

use std::sync::{Mutex, PoisonError};

use crate::compat::gate::Diagnostic;

/// A warning channel for compatibility diagnostics.
///
/// `emit` runs while the gate holds its lock, so implementations must not
/// call back into the gate.
pub trait DiagnosticSink: Send + Sync {
    /// Report one diagnostic.
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Reports diagnostics as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            dependency = %diagnostic.dependency,
            installed = %diagnostic.installed,
            minimum = %diagnostic.minimum,
            "{}",
            diagnostic
        );
    }
}

/// Keeps every emitted diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    recorded: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics emitted so far, oldest first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered messages of the diagnostics emitted so far.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics().iter().map(ToString::to_string).collect()
    }

    /// Number of diagnostics emitted so far.
    pub fn len(&self) -> usize {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}
