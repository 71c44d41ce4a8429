//! The global operation catalog.
//!
//! Once a dynamic operation kind is installed here it is constructible,
//! parseable, and printable by generic framework code exactly like a
//! build-time operation: the catalog is keyed by qualified name and
//! stores every hook the rest of the framework dispatches through.

use loam_diagnostic::{Diagnostic, DiagnosticQueue, ErrorGuaranteed};
use loam_ir::{Name, Printer, TokenStream};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::def::{OpParseFn, OpPrintFn, OpVerifyFn};
use crate::op::{CanonicalizationFn, FoldDeclined, FoldFn, Operation, TraitPredicate};
use crate::{Context, DialectId, KindId};

/// A catalog entry: everything generic code needs to handle one
/// operation kind.
pub struct RegisteredOp {
    /// Fully qualified name (`dialect.name`).
    pub qualified_name: Name,
    /// Owning dialect.
    pub dialect: DialectId,
    /// Process-unique identifier of the kind.
    pub id: KindId,
    /// Invariant verifier.
    pub verify: OpVerifyFn,
    /// Assembly parser.
    pub parse: OpParseFn,
    /// Assembly printer.
    pub print: OpPrintFn,
    /// Constant folding hook.
    pub fold: FoldFn,
    /// Canonicalization rewrites.
    pub canonicalizations: Vec<CanonicalizationFn>,
    /// Interfaces this kind implements.
    pub interfaces: FxHashSet<KindId>,
    /// Static trait membership predicate.
    pub has_trait: TraitPredicate,
}

impl RegisteredOp {
    /// Attempt constant folding.
    pub fn fold(
        &self,
        op: &Operation,
        results: &mut Vec<loam_ir::Attribute>,
    ) -> Result<(), FoldDeclined> {
        (self.fold)(op, results)
    }

    /// Whether this kind claims membership in a static trait.
    pub fn claims_trait(&self, trait_id: KindId) -> bool {
        (self.has_trait)(trait_id)
    }

    /// Whether this kind implements an interface.
    pub fn implements(&self, interface: KindId) -> bool {
        self.interfaces.contains(&interface)
    }
}

/// Failure marker: no operation with that name is in the catalog.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct UnknownOp;

/// The framework-wide operation table, keyed by qualified name.
#[derive(Default)]
pub struct OpCatalog {
    ops: FxHashMap<Name, RegisteredOp>,
}

impl OpCatalog {
    /// Install an entry.
    ///
    /// # Panics
    /// Panics if the qualified name is already taken.
    pub(crate) fn insert(&mut self, op: RegisteredOp, name_str: &str) {
        let prev = self.ops.insert(op.qualified_name, op);
        assert!(
            prev.is_none(),
            "operation `{name_str}` is already registered in the catalog"
        );
    }

    /// Look up an entry by qualified name.
    pub fn lookup(&self, name: Name) -> Option<&RegisteredOp> {
        self.ops.get(&name)
    }

    /// Number of registered operation kinds.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Context {
    /// Parse an operation by qualified name, then verify it.
    ///
    /// Tri-state like dynamic type parsing: `None` when the name is not
    /// in the catalog.
    pub fn parse_operation(
        &self,
        queue: &mut DiagnosticQueue,
        qualified_name: &str,
        ts: &mut TokenStream<'_>,
    ) -> Option<Result<Operation, ErrorGuaranteed>> {
        let name = self.strings.intern(qualified_name);
        let reg = self.ops.lookup(name)?;

        let mut op = Operation::new(name);
        if let Err(guar) = (reg.parse)(queue, ts, &mut op) {
            return Some(Err(guar));
        }

        let span = ts.current_span();
        let mut emit = |mut diagnostic: Diagnostic| {
            if diagnostic.primary_span().is_none() {
                diagnostic = diagnostic.with_label(span, "in this operation");
            }
            queue.emit_error(diagnostic)
        };
        Some((reg.verify)(&mut emit, &op).map(|()| op))
    }

    /// Print an operation through its registered print hook.
    pub fn print_operation(&self, op: &Operation, p: &mut Printer<'_>) -> Result<(), UnknownOp> {
        let reg = self.ops.lookup(op.name).ok_or(UnknownOp)?;
        (reg.print)(p, op);
        Ok(())
    }

    /// Verify an operation value against its registered verifier.
    pub fn verify_operation(
        &self,
        queue: &mut DiagnosticQueue,
        span: loam_ir::Span,
        op: &Operation,
    ) -> Result<(), ErrorGuaranteed> {
        let Some(reg) = self.ops.lookup(op.name) else {
            return Err(queue.emit_error(
                Diagnostic::error(loam_diagnostic::ErrorCode::E9001)
                    .with_message("operation kind is not registered")
                    .with_label(span, "this operation"),
            ));
        };
        let mut emit = |mut diagnostic: Diagnostic| {
            if diagnostic.primary_span().is_none() {
                diagnostic = diagnostic.with_label(span, "in this operation");
            }
            queue.emit_error(diagnostic)
        };
        (reg.verify)(&mut emit, op)
    }
}
