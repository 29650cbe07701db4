use super::*;
use crate::definition::from_source;
use logo_value::Constants;
use pretty_assertions::assert_eq;

fn nothing(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Ok(interp.constants().nothing())
}

fn primitive(name: &'static str) -> PrimitiveDescriptor {
    PrimitiveDescriptor {
        name,
        arity: Arity::fixed(1),
        capability: Capability::COMMAND,
        func: nothing,
    }
}

fn procedure(text: &str) -> Procedure {
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    match from_source(&Constants::new(), &lines) {
        Ok(procedure) => procedure,
        Err(err) => panic!("bad definition: {err:?}"),
    }
}

#[test]
fn user_procedures_shadow_primitives() {
    let mut registry = ProcedureRegistry::new();
    registry.register_primitive(primitive("print"), &["pr"]);
    assert!(matches!(registry.resolve("PR"), Some(Resolved::Primitive(_))));

    registry.define(procedure("to print :a :b\nend"));
    assert!(matches!(registry.resolve("print"), Some(Resolved::Procedure(_))));
    assert_eq!(registry.arity("print").map(|a| a.triple()), Some((2, 2, 2)));
    assert!(matches!(registry.resolve("pr"), Some(Resolved::Primitive(_))));

    registry.erase("print");
    assert!(matches!(registry.resolve("print"), Some(Resolved::Primitive(_))));
    assert!(registry.resolve("nonesuch").is_none());
}

#[test]
fn redefinition_leaves_old_handles_intact() {
    let mut registry = ProcedureRegistry::new();
    let old = registry.define(procedure("to f\nprint 1\nend"));
    let new = registry.define(procedure("to f :x\nprint 2\nend"));
    assert!(!old.ptr_eq(&new));
    assert_eq!(old.as_procedure().map(|p| p.arity.min), Some(0));
    assert_eq!(registry.arity("F").map(|a| a.min), Some(1));
    assert_eq!(
        registry.procedure_text("f").as_deref(),
        Some("to f :x\nprint 2\nend")
    );
}

#[test]
fn changes_bump_the_generation() {
    let mut registry = ProcedureRegistry::new();
    let start = registry.generation();
    registry.define(procedure("to g\nend"));
    let defined = registry.generation();
    assert!(defined > start);
    assert!(!registry.erase("missing"));
    assert_eq!(registry.generation(), defined);
    assert!(registry.erase("g"));
    assert!(registry.generation() > defined);
}

#[test]
fn erase_all_spares_buried_procedures() {
    let mut registry = ProcedureRegistry::new();
    registry.define(procedure("to keep\nend"));
    registry.define(procedure("to drop\nend"));
    registry.bury("KEEP");
    assert!(registry.is_buried("keep"));
    assert_eq!(
        registry.procedure_names(|_| true),
        vec!["drop".to_string(), "keep".to_string()]
    );
    registry.erase_all();
    assert!(registry.is_defined("keep"));
    assert!(!registry.is_defined("drop"));

    registry.unbury("keep");
    registry.erase_all();
    assert!(!registry.is_defined("keep"));
}
