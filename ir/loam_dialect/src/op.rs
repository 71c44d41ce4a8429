//! Generic operation values and operation-kind hook aliases.
//!
//! The full region/operand object model lives outside this crate; the
//! catalog's hooks only need a minimal structural value to verify,
//! fold, and print against.

use loam_ir::{Attribute, Name};

use crate::uniquer::ParamList;
use crate::KindId;

/// A minimal generic operation value: its qualified kind name plus
/// attribute operands.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Operation {
    /// Fully qualified kind name (`dialect.name`).
    pub name: Name,
    /// Attribute operands, in order.
    pub attrs: ParamList,
}

impl Operation {
    /// Create an operation value with no attributes.
    pub fn new(name: Name) -> Self {
        Operation {
            name,
            attrs: ParamList::new(),
        }
    }

    /// Append an attribute operand.
    pub fn push_attr(&mut self, attr: Attribute) {
        self.attrs.push(attr);
    }
}

/// Marker returned when a fold hook declines to fold.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FoldDeclined;

/// Fold hook: attempt constant folding, writing results on success.
/// Dynamically registered operations always decline.
pub type FoldFn =
    Box<dyn Fn(&Operation, &mut Vec<Attribute>) -> Result<(), FoldDeclined> + Send + Sync>;

/// A canonicalization rewrite; returns whether it changed the value.
pub type CanonicalizationFn = Box<dyn Fn(&mut Operation) -> bool + Send + Sync>;

/// Predicate for static trait membership. Dynamically registered
/// operations claim no trait.
pub type TraitPredicate = Box<dyn Fn(KindId) -> bool + Send + Sync>;
