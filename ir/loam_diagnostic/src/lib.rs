//! Diagnostic reporting for the Loam IR framework.
//!
//! - Error codes for searchability
//! - Clear messages with labeled spans
//! - [`ErrorGuaranteed`] as type-level proof that an error was reported
//! - [`DiagnosticQueue`] as the sink verification and parsing report into
//!
//! Recoverable failures (bad parameter lists, malformed input) flow
//! through this crate; precondition violations in registration code
//! panic instead and never produce a diagnostic.

mod diagnostic;
mod error_code;
mod guarantee;
mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::DiagnosticQueue;

use loam_ir::ParseError;

/// Convert a low-level parse error into a reportable diagnostic.
pub fn from_parse_error(err: &ParseError) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(err.message.clone())
        .with_label(err.span, "while parsing here")
}
