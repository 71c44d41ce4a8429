//! Dynamic type instances.
//!
//! A [`DynType`] is a 32-bit handle into the context's uniquer. Because
//! construction always goes through the uniquer, two handles are equal
//! exactly when their `(definition, parameters)` keys are structurally
//! equal — identity comparison substitutes for structural comparison
//! everywhere downstream.

use std::fmt;
use std::sync::Arc;

use loam_diagnostic::{from_parse_error, DiagnosticQueue, ErrorGuaranteed};
use loam_ir::{Attribute, Printer, TokenStream};

use crate::uniquer::ParamList;
use crate::{Context, DynTypeDefinition, KindId};

/// A minimal stand-in for the framework's built-in type universe.
///
/// The static object model is outside this crate; generic code only
/// needs *some* non-dynamic variant to dispatch against.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinType {
    Int,
    Float,
    Bool,
    Str,
    Unit,
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinType::Int => write!(f, "int"),
            BuiltinType::Float => write!(f, "float"),
            BuiltinType::Bool => write!(f, "bool"),
            BuiltinType::Str => write!(f, "str"),
            BuiltinType::Unit => write!(f, "unit"),
        }
    }
}

/// A type value: either built-in or dynamically registered.
///
/// The tagged union is the capability marker for the dynamic subsystem:
/// generic code asks "is this value dynamic" with [`DynType::classof`]
/// instead of enumerating registered kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    /// A built-in (statically known) type.
    Builtin(BuiltinType),
    /// A dynamically registered type instance.
    Dynamic(DynType),
}

/// Canonical instance of a dynamically registered type kind.
///
/// `Copy`, 4 bytes; equality and hashing are identity, which the
/// uniquer guarantees coincides with structural equality of the
/// underlying key.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct DynType(u32);

impl DynType {
    /// Maximum local index per uniquer shard.
    pub(crate) const MAX_LOCAL: u32 = 0x0FFF_FFFF;

    /// Pack a shard index and local index into a handle.
    #[inline]
    pub(crate) const fn pack(shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        DynType((shard << 28) | local)
    }

    /// Uniquer shard index.
    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    /// Local index within the shard.
    #[inline]
    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    /// Get the canonical instance for `(def, params)` without running
    /// the verifier.
    ///
    /// For internal, programmatic construction where the caller has
    /// already established validity.
    pub fn get(ctx: &Context, def: &Arc<DynTypeDefinition>, params: &[Attribute]) -> DynType {
        ctx.types().get(def, params)
    }

    /// Verify `params` against the definition, then intern.
    ///
    /// Failures are reported through `queue` at `span` and nothing is
    /// cached.
    pub fn get_checked(
        ctx: &Context,
        queue: &mut DiagnosticQueue,
        span: loam_ir::Span,
        def: &Arc<DynTypeDefinition>,
        params: &[Attribute],
    ) -> Result<DynType, ErrorGuaranteed> {
        ctx.types().get_checked(queue, span, def, params)
    }

    /// Parse the parameter syntax with the definition's parse hook,
    /// then build a checked instance.
    ///
    /// Parse failures and verification failures surface uniformly: the
    /// caller gets proof an error was reported either way.
    pub fn parse(
        ctx: &Context,
        queue: &mut DiagnosticQueue,
        ts: &mut TokenStream<'_>,
        def: &Arc<DynTypeDefinition>,
    ) -> Result<DynType, ErrorGuaranteed> {
        let mut params = Vec::new();
        if let Err(err) = (def.parser)(ts, &mut params) {
            return Err(queue.emit_error(from_parse_error(&err)));
        }
        // Bind later verification errors to where parsing stopped.
        Self::get_checked(ctx, queue, ts.current_span(), def, &params)
    }

    /// The identifier of this instance's kind.
    pub fn def_id(self, ctx: &Context) -> KindId {
        ctx.types().data(self).def.id
    }

    /// This instance's definition.
    pub fn definition(self, ctx: &Context) -> Arc<DynTypeDefinition> {
        ctx.types().data(self).def
    }

    /// This instance's parameter list.
    pub fn params(self, ctx: &Context) -> ParamList {
        ctx.types().data(self).params
    }

    /// Print the namespace-qualified name, then the parameters through
    /// the definition's print hook.
    pub fn print(self, ctx: &Context, p: &mut Printer<'_>) {
        let data = ctx.types().data(self);
        p.name(data.def.dialect_name);
        p.word(".");
        p.name(data.def.name);
        (data.def.printer)(p, &data.params);
    }

    /// Whether a type value belongs to the dynamic subsystem.
    pub fn classof(ty: &Type) -> bool {
        matches!(ty, Type::Dynamic(_))
    }

    /// Whether `ty` is an instance of the specific kind `def`.
    pub fn is_a(ty: &Type, def: &DynTypeDefinition, ctx: &Context) -> bool {
        matches!(ty, Type::Dynamic(t) if t.def_id(ctx) == def.id)
    }
}

impl fmt::Debug for DynType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynType({}:{})", self.shard(), self.local())
    }
}
