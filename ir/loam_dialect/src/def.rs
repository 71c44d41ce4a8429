//! Kind definitions: the registered description of a dynamic type or
//! operation kind.
//!
//! A definition carries a name, its owning dialect, a freshly allocated
//! [`KindId`], and three behaviors supplied by the registering party as
//! boxed closures: verify, parse, and print. Hooks are plain data fixed
//! at construction (no trait objects with inheritance, no vtable
//! hierarchy), so definitions stay ordinary values.

use loam_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use loam_ir::{Attribute, Name, ParseError, Printer, TokenStream};

use crate::op::Operation;
use crate::{Context, DialectId, KindId};

/// Callback handed to verify hooks for reporting parameter errors.
///
/// The emitter is pre-bound to the position the instance is being built
/// at; the hook only supplies the diagnostic content.
pub type ErrorEmitter<'a> = &'a mut dyn FnMut(Diagnostic) -> ErrorGuaranteed;

/// Verify hook: checks a parameter list before an instance is interned.
pub type VerifyFn =
    Box<dyn Fn(ErrorEmitter<'_>, &[Attribute]) -> Result<(), ErrorGuaranteed> + Send + Sync>;

/// Parse hook for type parameters: consumes the parameter syntax after
/// the type name and appends the parsed attributes.
pub type TypeParseFn =
    Box<dyn Fn(&mut TokenStream<'_>, &mut Vec<Attribute>) -> Result<(), ParseError> + Send + Sync>;

/// Print hook for type parameters: the inverse of the parse hook.
pub type TypePrintFn = Box<dyn Fn(&mut Printer<'_>, &[Attribute]) + Send + Sync>;

/// Verify hook for operation values.
pub type OpVerifyFn =
    Box<dyn Fn(ErrorEmitter<'_>, &Operation) -> Result<(), ErrorGuaranteed> + Send + Sync>;

/// Parse hook for operations. Unlike type parameter parsing, operation
/// parsers report rich diagnostics themselves, so the queue rides along.
pub type OpParseFn = Box<
    dyn Fn(&mut DiagnosticQueue, &mut TokenStream<'_>, &mut Operation) -> Result<(), ErrorGuaranteed>
        + Send
        + Sync,
>;

/// Print hook for operations.
pub type OpPrintFn = Box<dyn Fn(&mut Printer<'_>, &Operation) + Send + Sync>;

/// The definition of a dynamically registered type kind.
///
/// Each [`DynType`] instance references exactly one definition. The
/// definition is owned by its dialect for the dialect's whole lifetime.
///
/// [`DynType`]: crate::DynType
pub struct DynTypeDefinition {
    /// Unqualified name (no `.`).
    pub name: Name,
    /// Owning dialect.
    pub dialect: DialectId,
    /// The owning dialect's name, resolved once at construction.
    pub dialect_name: Name,
    /// Process-unique identifier for this kind.
    pub id: KindId,
    /// Parameter verifier.
    pub verifier: VerifyFn,
    /// Parameter parser.
    pub parser: TypeParseFn,
    /// Parameter printer.
    pub printer: TypePrintFn,
}

impl DynTypeDefinition {
    /// Create a definition with the default parameter syntax:
    /// nothing, or `<attr, attr, ...>` (an explicit empty `<>` is also
    /// accepted).
    ///
    /// # Panics
    /// Panics if `name` contains `'.'` — names must not be prefixed
    /// with the dialect name.
    pub fn new(ctx: &Context, dialect: DialectId, name: &str, verifier: VerifyFn) -> Self {
        Self::with_hooks(
            ctx,
            dialect,
            name,
            verifier,
            Box::new(default_type_parser),
            Box::new(default_type_printer),
        )
    }

    /// Create a definition with custom parse and print hooks.
    ///
    /// # Panics
    /// Panics if `name` contains `'.'`.
    pub fn with_hooks(
        ctx: &Context,
        dialect: DialectId,
        name: &str,
        verifier: VerifyFn,
        parser: TypeParseFn,
        printer: TypePrintFn,
    ) -> Self {
        assert!(
            !name.contains('.'),
            "dynamic type name `{name}` must not be prefixed with the dialect name"
        );
        DynTypeDefinition {
            name: ctx.interner().intern(name),
            dialect,
            dialect_name: ctx.dialect(dialect).name(),
            id: ctx.allocate_kind_id(),
            verifier,
            parser,
            printer,
        }
    }

    /// Run the verify hook.
    pub fn verify(
        &self,
        emit: ErrorEmitter<'_>,
        params: &[Attribute],
    ) -> Result<(), ErrorGuaranteed> {
        (self.verifier)(emit, params)
    }
}

impl std::fmt::Debug for DynTypeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynTypeDefinition")
            .field("name", &self.name)
            .field("dialect", &self.dialect)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Default type parameter parser.
///
/// No `<` means no parameters. `<>` is an explicit empty list.
/// Otherwise: one attribute, then `, attribute` until `>`.
fn default_type_parser(
    ts: &mut TokenStream<'_>,
    params: &mut Vec<Attribute>,
) -> Result<(), ParseError> {
    if !ts.eat_less() {
        return Ok(());
    }
    if ts.eat_greater() {
        return Ok(());
    }

    params.push(ts.parse_attribute()?);
    while !ts.eat_greater() {
        ts.expect_comma()?;
        params.push(ts.parse_attribute()?);
    }
    Ok(())
}

/// Default type parameter printer: the inverse of the default parser.
/// Empty parameter lists print nothing after the name.
fn default_type_printer(p: &mut Printer<'_>, params: &[Attribute]) {
    if params.is_empty() {
        return;
    }
    p.word("<");
    p.comma_separated(params);
    p.word(">");
}

/// The definition of a dynamically registered operation kind.
///
/// The stored name is fully qualified (`dialect.name`), computed once at
/// construction.
pub struct DynOpDefinition {
    /// Fully qualified name (`dialect.name`).
    pub qualified_name: Name,
    /// Owning dialect.
    pub dialect: DialectId,
    /// The owning dialect's name.
    pub dialect_name: Name,
    /// Process-unique identifier for this kind.
    pub id: KindId,
    /// Operation verifier.
    pub verifier: OpVerifyFn,
    /// Assembly parser.
    pub parser: OpParseFn,
    /// Assembly printer.
    pub printer: OpPrintFn,
}

impl DynOpDefinition {
    /// Create an operation definition with only a verifier.
    ///
    /// The installed parse hook fails every attempt with an explicit
    /// "defines no parser" diagnostic, so the kind is safe to register
    /// for builder-only use before any textual syntax exists. The
    /// installed print hook emits the generic structural form, which
    /// works for any well-formed operation value.
    ///
    /// # Panics
    /// Panics if `name` contains `'.'`.
    pub fn new(ctx: &Context, dialect: DialectId, name: &str, verifier: OpVerifyFn) -> Self {
        let dialect_name = ctx.interner().lookup(ctx.dialect(dialect).name()).to_owned();
        let qualified = format!("{dialect_name}.{name}");
        let parser: OpParseFn = Box::new(move |queue, ts, _op| {
            Err(queue.emit_error(
                Diagnostic::error(ErrorCode::E1004)
                    .with_message(format!(
                        "operation `{qualified}` is dynamically registered and defines no parser"
                    ))
                    .with_label(ts.current_span(), "while parsing this operation"),
            ))
        });
        Self::with_hooks(
            ctx,
            dialect,
            name,
            verifier,
            parser,
            Box::new(generic_op_printer),
        )
    }

    /// Create an operation definition with custom parse and print hooks.
    ///
    /// # Panics
    /// Panics if `name` contains `'.'`.
    pub fn with_hooks(
        ctx: &Context,
        dialect: DialectId,
        name: &str,
        verifier: OpVerifyFn,
        parser: OpParseFn,
        printer: OpPrintFn,
    ) -> Self {
        assert!(
            !name.contains('.'),
            "dynamic operation name `{name}` must not be prefixed with the dialect name"
        );
        let dialect_name = ctx.dialect(dialect).name();
        let qualified = format!("{}.{name}", ctx.interner().lookup(dialect_name));
        DynOpDefinition {
            qualified_name: ctx.interner().intern(&qualified),
            dialect,
            dialect_name,
            id: ctx.allocate_kind_id(),
            verifier,
            parser,
            printer,
        }
    }
}

impl std::fmt::Debug for DynOpDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynOpDefinition")
            .field("qualified_name", &self.qualified_name)
            .field("dialect", &self.dialect)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Generic structural printer, usable for any well-formed operation:
/// `"dialect.name"(attr, ...)`.
pub(crate) fn generic_op_printer(p: &mut Printer<'_>, op: &Operation) {
    p.word("\"");
    p.name(op.name);
    p.word("\"(");
    p.comma_separated(&op.attrs);
    p.word(")");
}

#[cfg(test)]
mod tests;
