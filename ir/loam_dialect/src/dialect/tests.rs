use super::*;
use loam_ir::Attribute;
use pretty_assertions::assert_eq;

use crate::{BuiltinType, VerifyFn};

fn accept_all() -> VerifyFn {
    Box::new(|_, _| Ok(()))
}

fn op_accept_all() -> crate::OpVerifyFn {
    Box::new(|_, _| Ok(()))
}

#[test]
#[should_panic(expected = "dialect `math` is already registered")]
fn duplicate_dialect_names_are_rejected() {
    let mut ctx = Context::new();
    let _ = ctx.create_dialect("math");
    let _ = ctx.create_extensible_dialect("math");
}

#[test]
fn registration_indexes_the_definition_both_ways() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let def = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let def = ctx.add_dynamic_type(math, def);

    let dialect = ctx.dialect(math);
    assert_eq!(dialect.dynamic_type_count(), 1);

    let by_name = dialect.lookup_type_definition(def.name).unwrap();
    assert_eq!(by_name.id, def.id);
    let by_id = dialect.lookup_type_definition_by_id(def.id).unwrap();
    assert_eq!(by_id.name, def.name);

    let unknown = ctx.interner().intern("unknown");
    assert!(dialect.lookup_type_definition(unknown).is_none());
}

#[test]
#[should_panic(expected = "a dynamic type named `complex` is already registered in this dialect")]
fn duplicate_type_names_are_rejected() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let first = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let second = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let _ = ctx.add_dynamic_type(math, first);
    let _ = ctx.add_dynamic_type(math, second);
}

#[test]
#[should_panic(expected = "trying to register dynamic type `complex` in the wrong dialect")]
fn registering_under_a_foreign_dialect_is_rejected() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let tensor = ctx.create_extensible_dialect("tensor");
    let def = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let _ = ctx.add_dynamic_type(tensor, def);
}

#[test]
#[should_panic(expected = "dialect `closed` does not accept runtime-registered kinds")]
fn non_extensible_dialects_reject_dynamic_types() {
    let mut ctx = Context::new();
    let closed = ctx.create_dialect("closed");
    let def = DynTypeDefinition::new(&ctx, closed, "complex", accept_all());
    let _ = ctx.add_dynamic_type(closed, def);
}

#[test]
#[should_panic(expected = "does not accept runtime-registered kinds")]
fn non_extensible_dialects_reject_dynamic_ops() {
    let mut ctx = Context::new();
    let closed = ctx.create_dialect("closed");
    let def = DynOpDefinition::new(&ctx, closed, "magma", op_accept_all());
    ctx.add_dynamic_op(closed, def);
}

#[test]
#[should_panic(expected = "trying to register dynamic operation `math.magma` in the wrong dialect")]
fn op_registration_checks_the_owner() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let tensor = ctx.create_extensible_dialect("tensor");
    let def = DynOpDefinition::new(&ctx, math, "magma", op_accept_all());
    ctx.add_dynamic_op(tensor, def);
}

#[test]
fn parse_optional_falls_through_for_unknown_names() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let def = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let _ = ctx.add_dynamic_type(math, def);

    let mut queue = DiagnosticQueue::new();
    let mut ts = TokenStream::new("<1>", ctx.interner()).unwrap();
    let result = ctx.parse_optional_dynamic_type(math, &mut queue, "matrix", &mut ts);

    assert!(result.is_none());
    assert!(!queue.has_errors());
}

#[test]
fn parse_optional_parses_known_names() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let def = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let _ = ctx.add_dynamic_type(math, def);

    let mut queue = DiagnosticQueue::new();
    let mut ts = TokenStream::new("<1, 2>", ctx.interner()).unwrap();
    let ty = ctx
        .parse_optional_dynamic_type(math, &mut queue, "complex", &mut ts)
        .unwrap()
        .unwrap();

    assert_eq!(
        ty.params(&ctx).as_slice(),
        &[Attribute::Int(1), Attribute::Int(2)]
    );
}

#[test]
fn parse_optional_reports_syntax_errors_for_known_names() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let def = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let _ = ctx.add_dynamic_type(math, def);

    let mut queue = DiagnosticQueue::new();
    let mut ts = TokenStream::new("<1 2>", ctx.interner()).unwrap();
    let result = ctx.parse_optional_dynamic_type(math, &mut queue, "complex", &mut ts);

    assert!(matches!(result, Some(Err(_))));
    assert!(queue.has_errors());
}

#[test]
fn print_if_dynamic_dispatches_on_the_variant() {
    let mut ctx = Context::new();
    let math = ctx.create_extensible_dialect("math");
    let def = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let def = ctx.add_dynamic_type(math, def);
    let ty = DynType::get(&ctx, &def, &[Attribute::Int(5)]);

    let mut out = String::new();
    let mut p = Printer::new(ctx.interner(), &mut out);
    assert_eq!(ctx.print_if_dynamic(&Type::Dynamic(ty), &mut p), Ok(()));
    assert_eq!(out, "math.complex<5>");

    let mut out = String::new();
    let mut p = Printer::new(ctx.interner(), &mut out);
    assert_eq!(
        ctx.print_if_dynamic(&Type::Builtin(BuiltinType::Int), &mut p),
        Err(NotDynamic)
    );
    assert_eq!(out, "");
}
