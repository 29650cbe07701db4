use super::*;
use crate::definition::from_source;
use crate::interpreter::Interpreter;
use crate::registry::{Capability, PrimitiveDescriptor};
use logo_value::{Arity, Constants, EvalResult};
use pretty_assertions::assert_eq;

fn noop(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Ok(interp.constants().nothing())
}

fn registry() -> ProcedureRegistry {
    let mut registry = ProcedureRegistry::new();
    let table = [
        ("print", Arity::new(0, 1, None)),
        ("sum", Arity::new(0, 2, None)),
        ("difference", Arity::fixed(2)),
        ("product", Arity::new(0, 2, None)),
        ("quotient", Arity::new(1, 2, Some(2))),
        ("minus", Arity::fixed(1)),
        ("equalp", Arity::fixed(2)),
        ("lessp", Arity::fixed(2)),
        ("first", Arity::fixed(1)),
        ("forward", Arity::fixed(1)),
    ];
    for (name, arity) in table {
        registry.register_primitive(
            PrimitiveDescriptor {
                name,
                arity,
                capability: Capability::empty(),
                func: noop,
            },
            &[],
        );
    }
    registry
}

fn render(ast: &Handle) -> String {
    let Some(node) = ast.as_ast() else {
        return format!("?{ast:?}");
    };
    let children: Vec<String> = node.children.iter().map(render).collect();
    match &node.kind {
        AstKind::Literal(value) => value.show(),
        AstKind::Variable(name) => format!(":{name}"),
        AstKind::Call(name) if children.is_empty() => format!("({name})"),
        AstKind::Call(name) => format!("({name} {})", children.join(" ")),
        AstKind::Sequence { .. } => children.join(" "),
    }
}

fn parse_text(registry: &ProcedureRegistry, text: &str) -> String {
    let constants = Constants::new();
    let result = crate::reader::read_line(&constants, text).and_then(|l| parse(registry, &l));
    match result {
        Ok(ast) => render(&ast),
        Err(err) => format!("error {}", err.as_error().map_or(0, |e| e.code())),
    }
}

#[test]
fn prefix_calls_use_default_arity() {
    let r = registry();
    assert_eq!(parse_text(&r, "print sum 1 2"), "(print (sum 1 2))");
    assert_eq!(parse_text(&r, "forward 10 forward 20"), "(forward 10) (forward 20)");
    assert_eq!(parse_text(&r, "print \"hello :x"), "(print hello) :x");
}

#[test]
fn infix_precedence() {
    let r = registry();
    assert_eq!(
        parse_text(&r, "print 1 + 2 * 3"),
        "(print (sum 1 (product 2 3)))"
    );
    assert_eq!(
        parse_text(&r, "print 1 + 2 = 3"),
        "(print (equalp (sum 1 2) 3))"
    );
    assert_eq!(parse_text(&r, "print 5 - 2 - 1"), "(print (difference (difference 5 2) 1))");
    assert_eq!(parse_text(&r, "print - :x"), "(print (minus :x))");
    assert_eq!(parse_text(&r, "print (1 + 2) * 3"), "(print (product (sum 1 2) 3))");
}

#[test]
fn parenthesized_calls_are_variadic() {
    let r = registry();
    assert_eq!(parse_text(&r, "(sum 1 2 3)"), "(sum 1 2 3)");
    assert_eq!(parse_text(&r, "(print)"), "(print)");
    assert_eq!(parse_text(&r, "(quotient 4)"), "(quotient 4)");
}

#[test]
fn parse_errors_carry_codes() {
    let r = registry();
    assert_eq!(parse_text(&r, "forward"), "error 6");
    assert_eq!(parse_text(&r, "print 3 *"), "error 6");
    assert_eq!(parse_text(&r, "(quotient 1 2 3)"), "error 8");
    assert_eq!(parse_text(&r, "print (1 2)"), "error 8");
    assert_eq!(parse_text(&r, "print (sum 1 2"), "error 10");
    assert_eq!(parse_text(&r, "print )"), "error 12");
    assert_eq!(parse_text(&r, "frobnicate 1"), "error 13");
}

#[test]
fn lists_and_arrays_are_literals() {
    let r = registry();
    assert_eq!(parse_text(&r, "print [a b]"), "(print [a b])");
    assert_eq!(parse_text(&r, "print {1 2}"), "(print {1 2})");
}

#[test]
fn cached_parse_is_reused_until_invalidated() {
    let mut r = registry();
    let constants = Constants::new();
    let Ok(list) = crate::reader::read_line(&constants, "print 1") else {
        panic!("read failed");
    };
    let (Ok(first), Ok(second)) = (parse_cached(&r, &list), parse_cached(&r, &list)) else {
        panic!("parse failed");
    };
    assert!(first.ptr_eq(&second));

    // Mutating the cell drops the artifact.
    if let Some(node) = list.as_list_node() {
        node.set_head(Handle::word("print"));
    }
    let Ok(third) = parse_cached(&r, &list) else {
        panic!("parse failed");
    };
    assert!(!third.ptr_eq(&second));

    // So does a registry change.
    let lines = vec!["to foo".to_string(), "end".to_string()];
    if let Ok(procedure) = from_source(&constants, &lines) {
        r.define(procedure);
    }
    let Ok(fourth) = parse_cached(&r, &list) else {
        panic!("parse failed");
    };
    assert!(!fourth.ptr_eq(&third));
}

#[test]
fn mutating_a_later_cell_drops_the_cached_parse() {
    let r = registry();
    let constants = Constants::new();
    let Ok(list) = crate::reader::read_line(&constants, "print 1") else {
        panic!("read failed");
    };
    let Ok(first) = parse_cached(&r, &list) else {
        panic!("parse failed");
    };
    let Some(second_cell) = list.as_list_node().map(|node| node.tail()) else {
        panic!("not a list");
    };
    if let Some(node) = second_cell.as_list_node() {
        node.set_head(Handle::word("2"));
    }
    let Ok(again) = parse_cached(&r, &list) else {
        panic!("parse failed");
    };
    assert!(!again.ptr_eq(&first));
    assert_eq!(render(&again), "(print 2)");
}

#[test]
fn redefinition_changes_the_parse() {
    let mut r = registry();
    let constants = Constants::new();
    let lines = vec!["to double :x".to_string(), "end".to_string()];
    if let Ok(procedure) = from_source(&constants, &lines) {
        r.define(procedure);
    }
    assert_eq!(parse_text(&r, "print double 2 3"), "(print (double 2)) 3");
    let lines = vec!["to double :x :y".to_string(), "end".to_string()];
    if let Ok(procedure) = from_source(&constants, &lines) {
        r.define(procedure);
    }
    assert_eq!(parse_text(&r, "print double 2 3"), "(print (double 2 3))");
}
