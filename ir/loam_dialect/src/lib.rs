//! Runtime-extensible dialect registry.
//!
//! Dialects group families of IR kinds under one name prefix. An
//! *extensible* dialect can additionally register brand-new type and
//! operation kinds while the framework is running, and instances of
//! those kinds behave exactly like built-in ones: interned to one
//! canonical record per distinct parameter list, compared by identity,
//! and parsed/printed through hooks the registering party supplies.
//!
//! The moving parts:
//!
//! - [`Context`] owns everything: the kind-identifier allocator, the
//!   string interner, the dialect table, the dynamic type uniquer, and
//!   the global operation catalog.
//! - [`DynTypeDefinition`] / [`DynOpDefinition`] describe a kind: its
//!   name, owning dialect, allocated [`KindId`], and verify/parse/print
//!   hooks (with sensible defaults).
//! - [`DynType`] is a canonical instance handle; handle equality *is*
//!   structural equality of `(definition, parameters)`.
//!
//! Registration is a setup-phase, `&mut Context` affair. Interning via
//! [`DynType::get`]/[`DynType::get_checked`] is `&Context` and safe to
//! call from many threads at once.

mod catalog;
mod context;
mod def;
mod dialect;
mod dyn_type;
mod id;
mod op;
mod uniquer;

pub use catalog::{OpCatalog, RegisteredOp, UnknownOp};
pub use context::Context;
pub use def::{
    DynOpDefinition, DynTypeDefinition, ErrorEmitter, OpParseFn, OpPrintFn, OpVerifyFn,
    TypeParseFn, TypePrintFn, VerifyFn,
};
pub use dialect::{Dialect, NotDynamic};
pub use dyn_type::{BuiltinType, DynType, Type};
pub use id::{DialectId, KindId};
pub use op::{CanonicalizationFn, FoldDeclined, FoldFn, Operation, TraitPredicate};
pub use uniquer::{DynTypeUniquer, ParamList};
