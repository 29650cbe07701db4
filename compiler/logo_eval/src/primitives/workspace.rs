//! Procedure definition and workspace management.

use logo_value::{doesnt_like, dont_know_how, file_system, Arity, EvalResult, Handle};

use super::{names_arg, word_arg, Primitive, COMMAND, OUTPUTS};
use crate::definition::{from_list, to_list};
use crate::interpreter::Interpreter;
use crate::toplevel::load_source;

pub(super) const PRIMITIVES: &[Primitive] = &[
    Primitive { names: &["define"], arity: Arity::fixed(2), capability: COMMAND, func: define },
    Primitive { names: &[".defmacro"], arity: Arity::fixed(2), capability: COMMAND, func: defmacro },
    Primitive { names: &["text"], arity: Arity::fixed(1), capability: OUTPUTS, func: text },
    Primitive { names: &["po"], arity: Arity::fixed(1), capability: COMMAND, func: po },
    Primitive { names: &["erase", "er"], arity: Arity::fixed(1), capability: COMMAND, func: erase },
    Primitive { names: &["erall"], arity: Arity::fixed(0), capability: COMMAND, func: erall },
    Primitive { names: &["procedures"], arity: Arity::fixed(0), capability: OUTPUTS, func: procedures },
    Primitive { names: &["primitivep", "primitive?"], arity: Arity::fixed(1), capability: OUTPUTS, func: primitivep },
    Primitive { names: &["definedp", "defined?"], arity: Arity::fixed(1), capability: OUTPUTS, func: definedp },
    Primitive { names: &["procedurep", "procedure?"], arity: Arity::fixed(1), capability: OUTPUTS, func: procedurep },
    Primitive { names: &["bury"], arity: Arity::fixed(1), capability: COMMAND, func: bury },
    Primitive { names: &["unbury"], arity: Arity::fixed(1), capability: COMMAND, func: unbury },
    Primitive { names: &["buriedp", "buried?"], arity: Arity::fixed(1), capability: OUTPUTS, func: buriedp },
    Primitive { names: &["save"], arity: Arity::fixed(1), capability: COMMAND, func: save },
    Primitive { names: &["load"], arity: Arity::fixed(1), capability: COMMAND, func: load },
    Primitive { names: &["help"], arity: Arity::new(0, 1, Some(1)), capability: COMMAND, func: help },
];

fn define_from_list(interp: &mut Interpreter, args: &[Handle], is_macro: bool) -> EvalResult {
    let procedure = from_list(interp.constants(), &args[0], &args[1], is_macro)?;
    interp.define(procedure);
    Ok(interp.nothing())
}

fn define(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    define_from_list(interp, args, false)
}

fn defmacro(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    define_from_list(interp, args, true)
}

/// The procedure a name refers to. Primitives have no text.
fn user_procedure(interp: &Interpreter, who: &str, name: &Handle) -> EvalResult {
    let text = word_arg(who, name)?;
    match interp.registry().procedure(text) {
        Some(procedure) => Ok(procedure),
        None if interp.registry().is_primitive(text) => Err(doesnt_like(who, name)),
        None => Err(dont_know_how(text)),
    }
}

fn text(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let handle = user_procedure(interp, "text", &args[0])?;
    let Some(procedure) = handle.as_procedure() else {
        return Err(doesnt_like("text", &args[0]));
    };
    to_list(interp.constants(), procedure)
}

/// PO: print the source of one or more procedures.
fn po(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let mut out = String::new();
    for name in names_arg("po", &args[0])? {
        let handle = user_procedure(interp, "po", &Handle::word(name.as_str()))?;
        if let Some(procedure) = handle.as_procedure() {
            out.push_str(&procedure.source);
            out.push('\n');
        }
    }
    interp.print(&out);
    Ok(interp.nothing())
}

fn erase(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    for name in names_arg("erase", &args[0])? {
        if interp.registry_mut().erase(&name) {
            continue;
        }
        if interp.registry().is_primitive(&name) {
            return Err(doesnt_like("erase", &Handle::word(name.as_str())));
        }
        return Err(dont_know_how(&name));
    }
    Ok(interp.nothing())
}

/// ERALL: erase every procedure and variable that is not buried.
fn erall(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    interp.registry.erase_all();
    let registry = &interp.registry;
    interp.frames.erase_all(|name| registry.is_buried(name));
    Ok(interp.nothing())
}

fn procedures(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    let registry = interp.registry();
    let names: Vec<Handle> = registry
        .procedure_names(|name| !registry.is_buried(name))
        .into_iter()
        .map(Handle::word)
        .collect();
    Ok(interp.constants().list(names))
}

fn primitivep(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let name = word_arg("primitivep", &args[0])?;
    let registry = interp.registry();
    Ok(Handle::boolean(
        registry.is_primitive(name) && !registry.is_defined(name),
    ))
}

fn definedp(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let name = word_arg("definedp", &args[0])?;
    Ok(Handle::boolean(interp.registry().is_defined(name)))
}

fn procedurep(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let name = word_arg("procedurep", &args[0])?;
    Ok(Handle::boolean(interp.registry().resolve(name).is_some()))
}

fn bury(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    for name in names_arg("bury", &args[0])? {
        interp.registry_mut().bury(&name);
    }
    Ok(interp.nothing())
}

fn unbury(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    for name in names_arg("unbury", &args[0])? {
        interp.registry_mut().unbury(&name);
    }
    Ok(interp.nothing())
}

fn buriedp(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let name = word_arg("buriedp", &args[0])?;
    Ok(Handle::boolean(interp.registry().is_buried(name)))
}

/// The text SAVE writes: every unburied procedure, blank-line separated.
pub(crate) fn workspace_source(interp: &Interpreter) -> String {
    let registry = interp.registry();
    let mut sources: Vec<String> = registry
        .procedure_names(|name| !registry.is_buried(name))
        .iter()
        .filter_map(|name| registry.procedure_text(name))
        .collect();
    if sources.is_empty() {
        return String::new();
    }
    sources.push(String::new());
    sources.join("\n\n")
}

fn save(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let path = word_arg("save", &args[0])?;
    let source = workspace_source(interp);
    std::fs::write(path, source).map_err(|err| file_system(format_args!("{path}: {err}")))?;
    tracing::debug!(path, "saved workspace");
    Ok(interp.nothing())
}

fn load(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let path = word_arg("load", &args[0])?;
    let source =
        std::fs::read_to_string(path).map_err(|err| file_system(format_args!("{path}: {err}")))?;
    load_source(interp, &source)?;
    Ok(interp.nothing())
}

fn help(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let Some(name) = args.first() else {
        interp.print("Type HELP followed by a procedure name.\n");
        return Ok(interp.nothing());
    };
    let name = word_arg("help", name)?;
    let text = match interp.texts().help_text(name) {
        Some(text) => format!("{text}\n"),
        None => format!("No help available on {}.\n", name.to_uppercase()),
    };
    interp.print(&text);
    Ok(interp.nothing())
}
