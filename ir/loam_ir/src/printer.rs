//! Printer for dialect print hooks.
//!
//! Wraps an output `String` together with the interner needed to resolve
//! names; print hooks write through this rather than `fmt::Write` so the
//! attribute syntax stays in one place.

use crate::{Attribute, Name, StringLookup};

/// Output stream handed to print hooks.
pub struct Printer<'a> {
    lookup: &'a dyn StringLookup,
    out: &'a mut String,
}

impl<'a> Printer<'a> {
    /// Create a printer appending to `out`.
    pub fn new(lookup: &'a dyn StringLookup, out: &'a mut String) -> Self {
        Printer { lookup, out }
    }

    /// Write raw text.
    pub fn word(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write an interned name.
    pub fn name(&mut self, name: Name) {
        let resolved = self.lookup.lookup(name);
        self.out.push_str(resolved);
    }

    /// Write one attribute in its textual form.
    pub fn attr(&mut self, attr: &Attribute) {
        let rendered = attr.display(&AsLookup(self.lookup)).to_string();
        self.out.push_str(&rendered);
    }

    /// Write attributes separated by `, `.
    pub fn comma_separated(&mut self, attrs: &[Attribute]) {
        for (i, attr) in attrs.iter().enumerate() {
            if i > 0 {
                self.word(", ");
            }
            self.attr(attr);
        }
    }
}

/// Adapter so `Attribute::display` (generic over `L: StringLookup`) can
/// run against the printer's dyn reference.
struct AsLookup<'a>(&'a dyn StringLookup);

impl StringLookup for AsLookup<'_> {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}
