//! Content-addressed uniquer for dynamic type instances.
//!
//! Maps `(kind identifier, parameter list)` to exactly one canonical
//! instance record for the life of the owning context. Records live in
//! per-shard append-only vectors, so a [`DynType`] handle stays valid
//! until the whole context is dropped; nothing is ever freed
//! individually.
//!
//! Concurrency follows the string interner: a read-locked fast path for
//! keys that are already cached, and a double-checked write lock that
//! serializes insertions of the same key, guaranteeing at most one
//! record per distinct key.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use loam_diagnostic::{DiagnosticQueue, ErrorGuaranteed};
use loam_ir::{Attribute, Span};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use smallvec::SmallVec;
use tracing::trace;

use crate::{DynType, DynTypeDefinition, KindId};

/// Ordered parameter list of a dynamic type instance.
///
/// Order is part of the identity key: `<1, 2>` and `<2, 1>` are
/// different instances.
pub type ParamList = SmallVec<[Attribute; 4]>;

/// Number of uniquer shards.
const NUM_SHARDS: usize = 16;

/// The identity key: definition identity plus parameter list.
#[derive(Clone, PartialEq, Eq, Hash)]
struct UniqueKey {
    def_id: KindId,
    params: ParamList,
}

/// One canonical instance record.
#[derive(Clone)]
pub(crate) struct DynTypeData {
    pub(crate) def: Arc<DynTypeDefinition>,
    pub(crate) params: ParamList,
}

/// Per-shard storage.
#[derive(Default)]
struct Shard {
    map: FxHashMap<UniqueKey, u32>,
    instances: Vec<DynTypeData>,
}

/// Sharded uniquer from `(KindId, params)` to canonical [`DynType`]
/// handles.
pub struct DynTypeUniquer {
    shards: [RwLock<Shard>; NUM_SHARDS],
    /// Kinds wired into the uniquer at registration time. Interning an
    /// unregistered kind is a precondition violation.
    registered: RwLock<FxHashSet<KindId>>,
}

impl DynTypeUniquer {
    /// Create an empty uniquer.
    pub fn new() -> Self {
        DynTypeUniquer {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
            registered: RwLock::new(FxHashSet::default()),
        }
    }

    /// Wire a kind into the uniquer. Called once per kind, at
    /// registration time.
    ///
    /// # Panics
    /// Panics if the kind is already wired in — identifiers are
    /// allocator-guaranteed unique, so a collision signals an allocator
    /// bug.
    pub(crate) fn register_kind(&self, id: KindId) {
        let inserted = self.registered.write().insert(id);
        assert!(inserted, "{id:?} is already wired into the type uniquer");
    }

    #[inline]
    fn shard_for(key: &UniqueKey) -> usize {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    /// Get or create the canonical instance for `(def, params)`.
    ///
    /// Does not run the verifier; use [`DynTypeUniquer::get_checked`]
    /// when the parameters come from outside.
    ///
    /// # Panics
    /// Panics if `def`'s kind was never wired in via registration.
    pub fn get(&self, def: &Arc<DynTypeDefinition>, params: &[Attribute]) -> DynType {
        assert!(
            self.registered.read().contains(&def.id),
            "{:?} was not registered with the type uniquer",
            def.id
        );

        let key = UniqueKey {
            def_id: def.id,
            params: ParamList::from_slice(params),
        };
        let shard_idx = Self::shard_for(&key);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        // Fast path: the key is already cached; hits only contend on
        // the read lock.
        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(&key) {
                return DynType::pack(shard_idx_u32, local);
            }
        }

        let mut guard = shard.write();

        // Double-check: another thread may have inserted between locks.
        if let Some(&local) = guard.map.get(&key) {
            return DynType::pack(shard_idx_u32, local);
        }

        let local = u32::try_from(guard.instances.len())
            .ok()
            .filter(|&l| l <= DynType::MAX_LOCAL)
            .unwrap_or_else(|| panic!("type uniquer shard {shard_idx} is full"));

        trace!(def_id = ?key.def_id, params = key.params.len(), "interning new dynamic type instance");
        guard.instances.push(DynTypeData {
            def: Arc::clone(def),
            params: key.params.clone(),
        });
        guard.map.insert(key, local);

        DynType::pack(shard_idx_u32, local)
    }

    /// Verify `params`, then behave as [`DynTypeUniquer::get`].
    ///
    /// On verification failure the error is reported through `queue`
    /// with its location bound to `span`, and nothing is inserted into
    /// the cache. Verification runs outside every uniquer lock and
    /// cannot observe or mutate cache state.
    pub fn get_checked(
        &self,
        queue: &mut DiagnosticQueue,
        span: Span,
        def: &Arc<DynTypeDefinition>,
        params: &[Attribute],
    ) -> Result<DynType, ErrorGuaranteed> {
        let mut emit = |mut diagnostic: loam_diagnostic::Diagnostic| {
            if diagnostic.primary_span().is_none() {
                diagnostic = diagnostic.with_label(span, "while building this type");
            }
            queue.emit_error(diagnostic)
        };
        def.verify(&mut emit, params)?;
        Ok(self.get(def, params))
    }

    /// Clone out the record behind a handle.
    ///
    /// Cheap: an `Arc` bump plus an inline-capacity parameter list copy.
    pub(crate) fn data(&self, ty: DynType) -> DynTypeData {
        let guard = self.shards[ty.shard()].read();
        guard.instances[ty.local()].clone()
    }

    /// Total number of canonical instances.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().instances.len()).sum()
    }

    /// Whether no instance has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DynTypeUniquer {
    fn default() -> Self {
        Self::new()
    }
}
