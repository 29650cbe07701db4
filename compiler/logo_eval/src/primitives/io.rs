//! Console input and output.

use logo_value::{Arity, EvalResult, Handle, PrintFlags};

use super::{Primitive, COMMAND, OUTPUTS, SUSPENDS};
use crate::interpreter::Interpreter;
use crate::reader::read_line;

pub(super) const PRIMITIVES: &[Primitive] = &[
    Primitive { names: &["print", "pr"], arity: Arity::new(0, 1, None), capability: COMMAND, func: print },
    Primitive { names: &["type"], arity: Arity::new(0, 1, None), capability: COMMAND, func: prim_type },
    Primitive { names: &["show"], arity: Arity::new(0, 1, None), capability: COMMAND, func: show },
    Primitive { names: &["readlist", "rl"], arity: Arity::fixed(0), capability: SUSPENDS.union(OUTPUTS), func: readlist },
    Primitive { names: &["readword", "rw"], arity: Arity::fixed(0), capability: SUSPENDS.union(OUTPUTS), func: readword },
    Primitive { names: &["readchar", "rc"], arity: Arity::fixed(0), capability: SUSPENDS.union(OUTPUTS), func: readchar },
];

fn render_all(interp: &Interpreter, args: &[Handle], flags: PrintFlags, separator: &str) -> String {
    args.iter()
        .map(|arg| interp.render(arg, flags))
        .collect::<Vec<_>>()
        .join(separator)
}

fn print(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let mut text = render_all(interp, args, PrintFlags::empty(), " ");
    text.push('\n');
    interp.print(&text);
    Ok(interp.nothing())
}

fn prim_type(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let text = render_all(interp, args, PrintFlags::empty(), "");
    interp.print(&text);
    Ok(interp.nothing())
}

/// SHOW keeps the brackets around lists.
fn show(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let mut text = render_all(interp, args, PrintFlags::SHOW_BRACKETS, " ");
    text.push('\n');
    interp.print(&text);
    Ok(interp.nothing())
}

/// At end of input the read primitives output the empty word.
fn readlist(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    match interp.request_line("")? {
        Some(text) => read_line(interp.constants(), &text),
        None => Ok(Handle::word("")),
    }
}

fn readword(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    let text = interp.request_line("")?.unwrap_or_default();
    Ok(Handle::word(text))
}

fn readchar(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    let text = interp
        .request_char()?
        .map(String::from)
        .unwrap_or_default();
    Ok(Handle::word(text))
}
