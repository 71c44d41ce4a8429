//! The context owning all registration and interning state.

use std::sync::atomic::{AtomicU32, Ordering};

use loam_ir::{Name, SharedInterner, StringInterner};
use rustc_hash::FxHashMap;

use crate::catalog::OpCatalog;
use crate::dialect::Dialect;
use crate::uniquer::DynTypeUniquer;
use crate::{DialectId, KindId};

/// Owns the kind-identifier allocator, the string interner, the dialect
/// table, the dynamic type uniquer, and the global operation catalog.
///
/// Lifetimes are textually explicit: everything a dialect registers
/// lives exactly as long as the context that registered it. Registration
/// methods take `&mut self` (setup phase, single-threaded by contract);
/// interning and lookup take `&self` and are safe from many threads.
pub struct Context {
    pub(crate) strings: SharedInterner,
    pub(crate) next_kind_id: AtomicU32,
    /// Capability marker attached to dialects that accept
    /// runtime-registered kinds.
    pub(crate) extensible_marker: KindId,
    pub(crate) dialects: Vec<Dialect>,
    pub(crate) dialect_names: FxHashMap<Name, DialectId>,
    pub(crate) types: DynTypeUniquer,
    pub(crate) ops: OpCatalog,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        let ctx = Context {
            strings: SharedInterner::new(),
            next_kind_id: AtomicU32::new(0),
            extensible_marker: KindId::from_raw(0),
            dialects: Vec::new(),
            dialect_names: FxHashMap::default(),
            types: DynTypeUniquer::new(),
            ops: OpCatalog::default(),
        };
        // The marker consumes the first identifier, like any other kind.
        let marker = ctx.allocate_kind_id();
        Context {
            extensible_marker: marker,
            ..ctx
        }
    }

    /// Allocate a fresh, never-reused kind identifier.
    ///
    /// # Panics
    /// Panics if the 32-bit identifier space is exhausted.
    pub fn allocate_kind_id(&self) -> KindId {
        let raw = self.next_kind_id.fetch_add(1, Ordering::Relaxed);
        assert!(raw != u32::MAX, "kind identifier space exhausted");
        KindId::from_raw(raw)
    }

    /// The context's string interner.
    pub fn interner(&self) -> &StringInterner {
        &self.strings
    }

    /// A shareable handle to the string interner.
    pub fn shared_interner(&self) -> SharedInterner {
        self.strings.clone()
    }

    /// The dynamic type uniquer.
    pub fn types(&self) -> &DynTypeUniquer {
        &self.types
    }

    /// The global operation catalog.
    pub fn ops(&self) -> &OpCatalog {
        &self.ops
    }

    /// The capability marker identifying extensible dialects.
    pub fn extensible_marker(&self) -> KindId {
        self.extensible_marker
    }

    /// Look up a dialect by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this context.
    pub fn dialect(&self, id: DialectId) -> &Dialect {
        &self.dialects[id.index()]
    }

    /// Look up a dialect by name.
    pub fn dialect_by_name(&self, name: &str) -> Option<DialectId> {
        let name = self.strings.intern(name);
        self.dialect_names.get(&name).copied()
    }

    /// Whether a dialect accepts runtime-registered kinds.
    pub fn is_extensible(&self, id: DialectId) -> bool {
        self.dialect(id).has_interface(self.extensible_marker)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
