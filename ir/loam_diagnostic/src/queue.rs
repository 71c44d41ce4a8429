//! Diagnostic queue: the sink that verification and parsing report into.

use crate::{Diagnostic, ErrorGuaranteed};

/// Collects diagnostics, tracks the error count, and hands out
/// [`ErrorGuaranteed`] proofs.
///
/// One queue per unit of work; the queue itself is not shared between
/// threads (each caller reports into its own and merges afterwards).
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic of any severity.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Add an error diagnostic, returning proof it was reported.
    ///
    /// # Panics
    /// Panics if the diagnostic's severity is not `Error`; the proof
    /// token must not be obtainable from warnings.
    pub fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        assert!(
            diagnostic.is_error(),
            "emit_error called with non-error diagnostic {}",
            diagnostic.code
        );
        self.emit(diagnostic);
        ErrorGuaranteed::new_unchecked()
    }

    /// Number of error diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Proof of emission, if any error has been reported.
    pub fn error_guarantee(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Diagnostics emitted so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the queue sorted by primary span, suppressing adjacent
    /// duplicates (same code, same primary span, same message).
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| d.primary_span().map(|s| (s.start, s.end)));
        out.dedup_by(|a, b| {
            a.code == b.code && a.primary_span() == b.primary_span() && a.message == b.message
        });
        out
    }
}
