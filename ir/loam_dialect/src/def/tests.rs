use super::*;
use loam_ir::Span;
use pretty_assertions::assert_eq;

fn accept_all() -> VerifyFn {
    Box::new(|_, _| Ok(()))
}

fn op_accept_all() -> OpVerifyFn {
    Box::new(|_, _| Ok(()))
}

fn ctx_with_dialect(name: &str) -> (Context, DialectId) {
    let mut ctx = Context::new();
    let dialect = ctx.create_extensible_dialect(name);
    (ctx, dialect)
}

#[test]
fn definition_records_name_owner_and_fresh_id() {
    let (ctx, math) = ctx_with_dialect("math");
    let complex = DynTypeDefinition::new(&ctx, math, "complex", accept_all());
    let vector = DynTypeDefinition::new(&ctx, math, "vector", accept_all());

    assert_eq!(ctx.interner().lookup(complex.name), "complex");
    assert_eq!(ctx.interner().lookup(complex.dialect_name), "math");
    assert_eq!(complex.dialect, math);
    assert_ne!(complex.id, vector.id);
}

#[test]
#[should_panic(expected = "must not be prefixed with the dialect name")]
fn dotted_type_name_is_rejected() {
    let (ctx, math) = ctx_with_dialect("math");
    let _ = DynTypeDefinition::new(&ctx, math, "math.complex", accept_all());
}

#[test]
#[should_panic(expected = "must not be prefixed with the dialect name")]
fn dotted_op_name_is_rejected() {
    let (ctx, math) = ctx_with_dialect("math");
    let _ = DynOpDefinition::new(&ctx, math, "math.magma", op_accept_all());
}

#[test]
fn op_definition_qualifies_its_name() {
    let (ctx, math) = ctx_with_dialect("math");
    let magma = DynOpDefinition::new(&ctx, math, "magma", op_accept_all());

    assert_eq!(ctx.interner().lookup(magma.qualified_name), "math.magma");
    assert_eq!(ctx.interner().lookup(magma.dialect_name), "math");
}

fn parse_params(ctx: &Context, src: &str) -> Result<Vec<Attribute>, ParseError> {
    let mut ts = TokenStream::new(src, ctx.interner()).unwrap();
    let mut params = Vec::new();
    default_type_parser(&mut ts, &mut params)?;
    Ok(params)
}

#[test]
fn default_parser_accepts_missing_parameter_list() {
    let (ctx, _) = ctx_with_dialect("math");
    assert_eq!(parse_params(&ctx, "").unwrap(), vec![]);
}

#[test]
fn default_parser_accepts_explicit_empty_list() {
    let (ctx, _) = ctx_with_dialect("math");
    assert_eq!(parse_params(&ctx, "<>").unwrap(), vec![]);
}

#[test]
fn default_parser_reads_comma_separated_attributes() {
    let (ctx, _) = ctx_with_dialect("math");
    let params = parse_params(&ctx, r#"<3, true, "re">"#).unwrap();
    let re = ctx.interner().intern("re");
    assert_eq!(
        params,
        vec![Attribute::Int(3), Attribute::Bool(true), Attribute::Str(re)]
    );
}

#[test]
fn default_parser_requires_commas_between_attributes() {
    let (ctx, _) = ctx_with_dialect("math");
    let err = parse_params(&ctx, "<1 2>").unwrap_err();
    assert_eq!(err.message, "expected `,`");
}

#[test]
fn default_parser_reports_unterminated_list() {
    let (ctx, _) = ctx_with_dialect("math");
    let err = parse_params(&ctx, "<1,").unwrap_err();
    assert_eq!(err.message, "expected attribute value, found end of input");
}

fn print_params(ctx: &Context, params: &[Attribute]) -> String {
    let mut out = String::new();
    let mut p = Printer::new(ctx.interner(), &mut out);
    default_type_printer(&mut p, params);
    out
}

#[test]
fn default_printer_omits_empty_parameter_lists() {
    let (ctx, _) = ctx_with_dialect("math");
    assert_eq!(print_params(&ctx, &[]), "");
}

#[test]
fn default_printer_is_the_inverse_of_the_default_parser() {
    let (ctx, _) = ctx_with_dialect("math");
    let src = r#"<-7, false, "a\"b">"#;
    let params = parse_params(&ctx, src).unwrap();
    assert_eq!(print_params(&ctx, &params), src);
}

#[test]
fn verifier_only_op_parser_fails_with_a_diagnostic() {
    let (ctx, math) = ctx_with_dialect("math");
    let magma = DynOpDefinition::new(&ctx, math, "magma", op_accept_all());

    let mut queue = DiagnosticQueue::new();
    let mut ts = TokenStream::new("", ctx.interner()).unwrap();
    let mut op = Operation::new(magma.qualified_name);
    let result = (magma.parser)(&mut queue, &mut ts, &mut op);

    assert!(result.is_err());
    assert_eq!(queue.error_count(), 1);
    let diagnostic = &queue.diagnostics()[0];
    assert_eq!(diagnostic.code, ErrorCode::E1004);
    assert_eq!(
        diagnostic.message,
        "operation `math.magma` is dynamically registered and defines no parser"
    );
}

#[test]
fn generic_printer_emits_the_structural_form() {
    let (ctx, math) = ctx_with_dialect("math");
    let magma = DynOpDefinition::new(&ctx, math, "magma", op_accept_all());

    let mut op = Operation::new(magma.qualified_name);
    op.push_attr(Attribute::Int(1));
    op.push_attr(Attribute::Bool(true));

    let mut out = String::new();
    let mut p = Printer::new(ctx.interner(), &mut out);
    generic_op_printer(&mut p, &op);
    assert_eq!(out, r#""math.magma"(1, true)"#);
}

#[test]
fn verify_delegates_to_the_hook() {
    let (ctx, math) = ctx_with_dialect("math");
    let even_arity: VerifyFn = Box::new(|emit, params| {
        if params.len() % 2 == 0 {
            Ok(())
        } else {
            Err(emit(
                Diagnostic::error(ErrorCode::E2001).with_message("expected an even arity"),
            ))
        }
    });
    let def = DynTypeDefinition::new(&ctx, math, "pairs", even_arity);

    let mut queue = DiagnosticQueue::new();
    let span = Span::DUMMY;
    let mut emit =
        |diagnostic: Diagnostic| queue.emit_error(diagnostic.with_label(span, "while checking"));

    assert!(def.verify(&mut emit, &[]).is_ok());
    assert!(def
        .verify(&mut emit, &[Attribute::Int(1), Attribute::Int(2)])
        .is_ok());
    assert!(def.verify(&mut emit, &[Attribute::Int(1)]).is_err());
    assert_eq!(queue.error_count(), 1);
}
