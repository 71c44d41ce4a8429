//! Core vocabulary for the Loam IR framework.
//!
//! This crate is the leaf of the workspace: source spans, interned names,
//! attribute values, the token stream consumed by parse hooks, and the
//! printer driven by print hooks. Everything here is independent of the
//! dialect machinery in `loam_dialect`.

mod attr;
mod interner;
mod name;
mod printer;
mod span;
mod token;

pub use attr::Attribute;
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use printer::Printer;
pub use span::{Span, SpanError};
pub use token::{ParseError, TokenKind, TokenStream};
