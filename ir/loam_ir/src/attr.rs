//! Attribute values.
//!
//! An [`Attribute`] is the opaque compile-time value a dynamic type or
//! operation is parameterized over. Attributes are small `Copy` values
//! with structural equality and hashing, which makes them usable directly
//! as uniquing-key elements.

use std::fmt;

use crate::{Name, StringLookup};

/// A compile-time attribute value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    /// Signed integer attribute.
    Int(i64),
    /// Boolean attribute.
    Bool(bool),
    /// Interned string attribute.
    Str(Name),
}

impl Attribute {
    /// Render the attribute in its textual form.
    ///
    /// Integers print bare, booleans as `true`/`false`, strings quoted
    /// with `\\` and `\"` escaped — the same form `TokenStream` accepts.
    pub fn display<'a, L: StringLookup>(&'a self, lookup: &'a L) -> impl fmt::Display + 'a {
        DisplayAttr { attr: self, lookup }
    }
}

struct DisplayAttr<'a, L> {
    attr: &'a Attribute,
    lookup: &'a L,
}

impl<L: StringLookup> fmt::Display for DisplayAttr<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.attr {
            Attribute::Int(v) => write!(f, "{v}"),
            Attribute::Bool(v) => write!(f, "{v}"),
            Attribute::Str(name) => {
                f.write_str("\"")?;
                for c in self.lookup.lookup(name).chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}
