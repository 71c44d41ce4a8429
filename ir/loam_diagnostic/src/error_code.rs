//! Error codes for all framework diagnostics.
//!
//! Format: E#### where the first digit indicates the phase:
//! - E0xxx: lexing / token errors
//! - E1xxx: parse errors
//! - E2xxx: verification errors
//! - E9xxx: internal errors

use std::fmt;

/// Error codes for all framework diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Invalid token in attribute syntax
    E0001,
    /// Unexpected token
    E1001,
    /// Expected attribute value
    E1002,
    /// Unclosed parameter list
    E1003,
    /// Operation defines no parser
    E1004,
    /// Type parameter verification failed
    E2001,
    /// Operation verification failed
    E2002,
    /// Internal framework error
    E9001,
}

impl ErrorCode {
    /// The code as a string (e.g. `"E2001"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description for `--explain`-style output.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "invalid token in attribute syntax",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected an attribute value",
            ErrorCode::E1003 => "unclosed parameter list",
            ErrorCode::E1004 => "dynamically registered operation defines no parser",
            ErrorCode::E2001 => "type parameter verification failed",
            ErrorCode::E2002 => "operation verification failed",
            ErrorCode::E9001 => "internal framework error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
