//! Type-level proof that an error was emitted.

use std::fmt;

/// Proof that at least one error diagnostic was reported.
///
/// Only obtainable from [`DiagnosticQueue::emit_error`] or from a
/// non-zero error count, so a function returning
/// `Result<T, ErrorGuaranteed>` cannot fail silently.
///
/// [`DiagnosticQueue::emit_error`]: crate::DiagnosticQueue::emit_error
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Build a guarantee from an error count; `None` if zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then_some(ErrorGuaranteed(()))
    }

    pub(crate) fn new_unchecked() -> Self {
        ErrorGuaranteed(())
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}
