//! Variables.

use logo_value::{Arity, EvalResult, Handle};

use super::{names_arg, word_arg, Primitive, COMMAND, OUTPUTS};
use crate::interpreter::Interpreter;

pub(super) const PRIMITIVES: &[Primitive] = &[
    Primitive { names: &["make"], arity: Arity::fixed(2), capability: COMMAND, func: make },
    Primitive { names: &["name"], arity: Arity::fixed(2), capability: COMMAND, func: name },
    Primitive { names: &["local"], arity: Arity::new(1, 1, None), capability: COMMAND, func: local },
    Primitive { names: &["localmake"], arity: Arity::fixed(2), capability: COMMAND, func: localmake },
    Primitive { names: &["global"], arity: Arity::new(1, 1, None), capability: COMMAND, func: global },
    Primitive { names: &["thing"], arity: Arity::fixed(1), capability: OUTPUTS, func: thing },
    Primitive { names: &["namep", "name?"], arity: Arity::fixed(1), capability: OUTPUTS, func: namep },
    Primitive { names: &["names"], arity: Arity::fixed(0), capability: OUTPUTS, func: names },
    Primitive { names: &["ern"], arity: Arity::fixed(1), capability: COMMAND, func: ern },
];

fn make(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let var = word_arg("make", &args[0])?;
    interp.frames_mut().assign(var, args[1].clone());
    Ok(interp.nothing())
}

/// `NAME value name`: MAKE with the inputs swapped.
fn name(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let var = word_arg("name", &args[1])?;
    interp.frames_mut().assign(var, args[0].clone());
    Ok(interp.nothing())
}

fn local(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let nothing = interp.nothing();
    for arg in args {
        for var in names_arg("local", arg)? {
            interp.frames_mut().declare_local(&var, &nothing);
        }
    }
    Ok(nothing)
}

fn localmake(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let var = word_arg("localmake", &args[0])?;
    interp.frames_mut().bind_local(var, args[1].clone());
    Ok(interp.nothing())
}

fn global(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let nothing = interp.nothing();
    for arg in args {
        for var in names_arg("global", arg)? {
            interp.frames_mut().declare_global(&var, &nothing);
        }
    }
    Ok(nothing)
}

fn thing(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    interp.thing(word_arg("thing", &args[0])?)
}

fn namep(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let var = word_arg("namep", &args[0])?;
    let bound = interp
        .frames()
        .lookup(var)
        .is_some_and(|value| !value.is_nothing());
    Ok(Handle::boolean(bound))
}

/// `[[] [var ...]]`: the workspace contents list of visible variables.
fn names(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    let registry = interp.registry();
    let vars: Vec<Handle> = interp
        .frames()
        .collect_names(|name| !registry.is_buried(name))
        .into_iter()
        .map(Handle::word)
        .collect();
    let constants = interp.constants();
    Ok(constants.list([constants.empty_list(), constants.list(vars)]))
}

fn ern(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    for var in names_arg("ern", &args[0])? {
        interp.frames_mut().erase(&var);
    }
    Ok(interp.nothing())
}
