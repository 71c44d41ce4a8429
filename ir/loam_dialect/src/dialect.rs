//! Dialects and the extensible registration surface.
//!
//! A dialect owns the kind definitions registered under its name prefix,
//! indexed both by identifier and by name. The two indices form a
//! bijection: one definition per id, one definition per name. Breaking
//! either is a registration-time bug and panics.

use std::sync::Arc;

use loam_diagnostic::{DiagnosticQueue, ErrorGuaranteed};
use loam_ir::{Name, Printer, TokenStream};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::catalog::RegisteredOp;
use crate::op::{FoldDeclined, FoldFn, TraitPredicate};
use crate::{Context, DialectId, DynOpDefinition, DynType, DynTypeDefinition, KindId, Type};

/// A registered dialect: a family of kinds under one name prefix.
pub struct Dialect {
    id: DialectId,
    name: Name,
    /// Capability markers this dialect carries.
    interfaces: FxHashSet<KindId>,
    /// Dynamic type definitions by identifier.
    dyn_types: FxHashMap<KindId, Arc<DynTypeDefinition>>,
    /// Dynamic type definitions by unqualified name.
    dyn_type_names: FxHashMap<Name, KindId>,
}

impl Dialect {
    pub(crate) fn new(id: DialectId, name: Name) -> Self {
        Dialect {
            id,
            name,
            interfaces: FxHashSet::default(),
            dyn_types: FxHashMap::default(),
            dyn_type_names: FxHashMap::default(),
        }
    }

    /// This dialect's id within its context.
    pub fn id(&self) -> DialectId {
        self.id
    }

    /// This dialect's name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// Generic capability query: does this dialect carry `marker`?
    pub fn has_interface(&self, marker: KindId) -> bool {
        self.interfaces.contains(&marker)
    }

    pub(crate) fn add_interface(&mut self, marker: KindId) {
        self.interfaces.insert(marker);
    }

    /// Look up a dynamic type definition by unqualified name.
    pub fn lookup_type_definition(&self, name: Name) -> Option<&Arc<DynTypeDefinition>> {
        let id = self.dyn_type_names.get(&name)?;
        self.dyn_types.get(id)
    }

    /// Look up a dynamic type definition by identifier.
    pub fn lookup_type_definition_by_id(&self, id: KindId) -> Option<&Arc<DynTypeDefinition>> {
        self.dyn_types.get(&id)
    }

    /// Number of dynamic type kinds registered here.
    pub fn dynamic_type_count(&self) -> usize {
        self.dyn_types.len()
    }

    /// Insert a definition into both indices.
    ///
    /// # Panics
    /// Panics on a duplicate identifier (allocator bug) or a duplicate
    /// name (registration-time authoring bug).
    fn insert_dynamic_type(&mut self, def: &Arc<DynTypeDefinition>, name_str: &str) {
        let prev = self.dyn_types.insert(def.id, Arc::clone(def));
        assert!(
            prev.is_none(),
            "{:?} is already bound to a dynamic type in this dialect",
            def.id
        );
        let prev = self.dyn_type_names.insert(def.name, def.id);
        assert!(
            prev.is_none(),
            "a dynamic type named `{name_str}` is already registered in this dialect"
        );
    }
}

/// Failure marker: the value handed to `print_if_dynamic` was not
/// dynamic.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct NotDynamic;

impl Context {
    /// Register a plain (non-extensible) dialect.
    ///
    /// # Panics
    /// Panics if a dialect with this name already exists.
    pub fn create_dialect(&mut self, name: &str) -> DialectId {
        let interned = self.strings.intern(name);
        assert!(
            !self.dialect_names.contains_key(&interned),
            "dialect `{name}` is already registered"
        );
        let id = DialectId::from_raw(
            u32::try_from(self.dialects.len())
                .unwrap_or_else(|_| panic!("dialect table overflow")),
        );
        self.dialects.push(Dialect::new(id, interned));
        self.dialect_names.insert(interned, id);
        debug!(dialect = name, "registered dialect");
        id
    }

    /// Register a dialect that accepts runtime-registered kinds.
    ///
    /// Attaches the extensibility capability marker once, at
    /// construction; generic code can later test for it with
    /// [`Context::is_extensible`] without knowing the dialect.
    pub fn create_extensible_dialect(&mut self, name: &str) -> DialectId {
        let id = self.create_dialect(name);
        let marker = self.extensible_marker;
        self.dialects[id.index()].add_interface(marker);
        id
    }

    /// Register a dynamic type kind with its declared owner dialect.
    ///
    /// Wires the definition into the uniquer's schema and both dialect
    /// indices. Returns the shared definition for immediate use with
    /// [`DynType::get`].
    ///
    /// # Panics
    /// Panics if `owner` is not the definition's declared dialect, if
    /// `owner` is not extensible, or on duplicate id/name (see
    /// [`Dialect`] invariants).
    pub fn add_dynamic_type(
        &mut self,
        owner: DialectId,
        def: DynTypeDefinition,
    ) -> Arc<DynTypeDefinition> {
        let name_str = self.strings.lookup_static(def.name);
        let dialect_str = self.strings.lookup_static(self.dialect(owner).name());
        assert_eq!(
            def.dialect, owner,
            "trying to register dynamic type `{name_str}` in the wrong dialect"
        );
        assert!(
            self.is_extensible(owner),
            "dialect `{dialect_str}` does not accept runtime-registered kinds"
        );

        let def = Arc::new(def);
        self.dialects[owner.index()].insert_dynamic_type(&def, name_str);
        self.types.register_kind(def.id);
        debug!(
            dialect = dialect_str,
            name = name_str,
            id = def.id.raw(),
            "registered dynamic type"
        );
        def
    }

    /// Register a dynamic operation kind with its declared owner
    /// dialect, installing it into the global operation catalog.
    ///
    /// Dynamic operations never fold, carry no canonicalization
    /// patterns, implement no interfaces, and claim no static trait.
    ///
    /// # Panics
    /// Panics if `owner` is not the definition's declared dialect, if
    /// `owner` is not extensible, or if the qualified name is already in
    /// the catalog.
    pub fn add_dynamic_op(&mut self, owner: DialectId, def: DynOpDefinition) {
        let name_str = self.strings.lookup_static(def.qualified_name);
        let dialect_str = self.strings.lookup_static(self.dialect(owner).name());
        assert_eq!(
            def.dialect, owner,
            "trying to register dynamic operation `{name_str}` in the wrong dialect"
        );
        assert!(
            self.is_extensible(owner),
            "dialect `{dialect_str}` does not accept runtime-registered kinds"
        );

        let fold: FoldFn = Box::new(|_op, _results| Err(FoldDeclined));
        let has_trait: TraitPredicate = Box::new(|_| false);
        self.ops.insert(
            RegisteredOp {
                qualified_name: def.qualified_name,
                dialect: def.dialect,
                id: def.id,
                verify: def.verifier,
                parse: def.parser,
                print: def.printer,
                fold,
                canonicalizations: Vec::new(),
                interfaces: FxHashSet::default(),
                has_trait,
            },
            name_str,
        );
        debug!(
            dialect = dialect_str,
            name = name_str,
            "registered dynamic operation"
        );
    }

    /// Parse `type_name` as a dynamic type of `dialect`, if it is one.
    ///
    /// Tri-state: `None` when the name is not a dynamic type of this
    /// dialect (the caller falls through to its static type parser);
    /// otherwise the parse/verify result.
    pub fn parse_optional_dynamic_type(
        &self,
        dialect: DialectId,
        queue: &mut DiagnosticQueue,
        type_name: &str,
        ts: &mut TokenStream<'_>,
    ) -> Option<Result<DynType, ErrorGuaranteed>> {
        let name = self.strings.intern(type_name);
        let def = Arc::clone(self.dialect(dialect).lookup_type_definition(name)?);
        Some(DynType::parse(self, queue, ts, &def))
    }

    /// Print `ty` if it belongs to the dynamic subsystem.
    ///
    /// Lets a generic printer dispatch into the dynamic print path
    /// without enumerating registered kinds.
    pub fn print_if_dynamic(&self, ty: &Type, p: &mut Printer<'_>) -> Result<(), NotDynamic> {
        match ty {
            Type::Dynamic(dyn_ty) => {
                dyn_ty.print(self, p);
                Ok(())
            }
            Type::Builtin(_) => Err(NotDynamic),
        }
    }
}

#[cfg(test)]
mod tests;
