//! The primitive library.
//!
//! Each submodule exports a `PRIMITIVES` table. A table entry lists the
//! canonical name first, then its aliases.

mod arith;
mod control;
mod data;
mod io;
mod turtle;
mod variables;
mod workspace;

use logo_value::{doesnt_like, Arity, Handle, Unwind};

use crate::registry::{Capability, PrimitiveDescriptor, PrimitiveFn, ProcedureRegistry};

pub(crate) struct Primitive {
    pub names: &'static [&'static str],
    pub arity: Arity,
    pub capability: Capability,
    pub func: PrimitiveFn,
}

const OUTPUTS: Capability = Capability::OUTPUTS;
const COMMAND: Capability = Capability::COMMAND;
const MAY_OUTPUT: Capability = Capability::MAY_OUTPUT.union(Capability::CONTROL);
const CONTROL: Capability = Capability::COMMAND.union(Capability::CONTROL);
const SUSPENDS: Capability = Capability::SUSPENDS;

/// Register every primitive table.
pub fn register_all(registry: &mut ProcedureRegistry) {
    let tables: [&[Primitive]; 7] = [
        data::PRIMITIVES,
        arith::PRIMITIVES,
        variables::PRIMITIVES,
        control::PRIMITIVES,
        workspace::PRIMITIVES,
        io::PRIMITIVES,
        turtle::PRIMITIVES,
    ];
    for primitive in tables.into_iter().flatten() {
        let Some((name, aliases)) = primitive.names.split_first() else {
            continue;
        };
        registry.register_primitive(
            PrimitiveDescriptor {
                name: *name,
                arity: primitive.arity,
                capability: primitive.capability,
                func: primitive.func,
            },
            aliases,
        );
    }
}

// Input coercions. Each names the primitive in its error.

fn number_arg(who: &str, value: &Handle) -> Result<f64, Unwind> {
    value.as_number().ok_or_else(|| doesnt_like(who, value))
}

fn integer_arg(who: &str, value: &Handle) -> Result<i64, Unwind> {
    match value.as_number() {
        Some(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Ok(n as i64),
        _ => Err(doesnt_like(who, value)),
    }
}

fn index_arg(who: &str, value: &Handle) -> Result<usize, Unwind> {
    usize::try_from(integer_arg(who, value)?).map_err(|_| doesnt_like(who, value))
}

fn bool_arg(who: &str, value: &Handle) -> Result<bool, Unwind> {
    value.as_bool().ok_or_else(|| doesnt_like(who, value))
}

fn word_arg<'a>(who: &str, value: &'a Handle) -> Result<&'a str, Unwind> {
    value.text().ok_or_else(|| doesnt_like(who, value))
}

fn list_arg<'a>(who: &str, value: &'a Handle) -> Result<&'a Handle, Unwind> {
    if value.is_list() {
        Ok(value)
    } else {
        Err(doesnt_like(who, value))
    }
}

/// A word, or a list of words: the names a command applies to.
fn names_arg(who: &str, value: &Handle) -> Result<Vec<String>, Unwind> {
    if let Some(text) = value.text() {
        return Ok(vec![text.to_string()]);
    }
    list_arg(who, value)?
        .to_vec()
        .iter()
        .map(|item| word_arg(who, item).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests;
