//! Words, lists and arrays.

use logo_value::{
    butfirst, butlast, count, doesnt_like, equal, first, fput, item, last, lput, member, memberp,
    new_array, sentence, set_butfirst, set_first, set_item, word, Arity, EvalResult, Handle,
};

use super::{integer_arg, word_arg, Primitive, COMMAND, OUTPUTS};
use crate::interpreter::Interpreter;

pub(super) const PRIMITIVES: &[Primitive] = &[
    Primitive { names: &["word"], arity: Arity::new(0, 2, None), capability: OUTPUTS, func: prim_word },
    Primitive { names: &["list"], arity: Arity::new(0, 2, None), capability: OUTPUTS, func: prim_list },
    Primitive { names: &["sentence", "se"], arity: Arity::new(0, 2, None), capability: OUTPUTS, func: prim_sentence },
    Primitive { names: &["fput"], arity: Arity::fixed(2), capability: OUTPUTS, func: prim_fput },
    Primitive { names: &["lput"], arity: Arity::fixed(2), capability: OUTPUTS, func: prim_lput },
    Primitive { names: &["first"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_first },
    Primitive { names: &["last"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_last },
    Primitive { names: &["butfirst", "bf"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_butfirst },
    Primitive { names: &["butlast", "bl"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_butlast },
    Primitive { names: &["item"], arity: Arity::fixed(2), capability: OUTPUTS, func: prim_item },
    Primitive { names: &["setitem"], arity: Arity::fixed(3), capability: COMMAND, func: prim_setitem },
    Primitive { names: &[".setfirst"], arity: Arity::fixed(2), capability: COMMAND, func: prim_setfirst },
    Primitive { names: &[".setbf"], arity: Arity::fixed(2), capability: COMMAND, func: prim_setbf },
    Primitive { names: &["array"], arity: Arity::new(1, 1, Some(2)), capability: OUTPUTS, func: prim_array },
    Primitive { names: &["count"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_count },
    Primitive { names: &["emptyp", "empty?"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_emptyp },
    Primitive { names: &["wordp", "word?"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_wordp },
    Primitive { names: &["listp", "list?"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_listp },
    Primitive { names: &["arrayp", "array?"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_arrayp },
    Primitive { names: &["numberp", "number?"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_numberp },
    Primitive { names: &["equalp", "equal?"], arity: Arity::fixed(2), capability: OUTPUTS, func: prim_equalp },
    Primitive { names: &["notequalp", "notequal?"], arity: Arity::fixed(2), capability: OUTPUTS, func: prim_notequalp },
    Primitive { names: &["memberp", "member?"], arity: Arity::fixed(2), capability: OUTPUTS, func: prim_memberp },
    Primitive { names: &["member"], arity: Arity::fixed(2), capability: OUTPUTS, func: prim_member },
    Primitive { names: &["ascii"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_ascii },
    Primitive { names: &["char"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_char },
    Primitive { names: &["uppercase"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_uppercase },
    Primitive { names: &["lowercase"], arity: Arity::fixed(1), capability: OUTPUTS, func: prim_lowercase },
];

fn prim_word(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    word(args)
}

fn prim_list(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(interp.constants().list(args.to_vec()))
}

fn prim_sentence(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    sentence(interp.constants(), args)
}

fn prim_fput(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    fput(&args[0], &args[1])
}

fn prim_lput(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    lput(interp.constants(), &args[0], &args[1])
}

fn prim_first(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    first(&args[0])
}

fn prim_last(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    last(&args[0])
}

fn prim_butfirst(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    butfirst(&args[0])
}

fn prim_butlast(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    butlast(interp.constants(), &args[0])
}

fn prim_item(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    item(&args[0], &args[1])
}

fn prim_setitem(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    set_item(&args[0], &args[1], &args[2])?;
    Ok(interp.nothing())
}

fn prim_setfirst(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    set_first(&args[0], &args[1])?;
    Ok(interp.nothing())
}

fn prim_setbf(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    set_butfirst(&args[0], &args[1])?;
    Ok(interp.nothing())
}

/// `ARRAY size` or `(ARRAY size origin)`. Slots start as empty lists.
fn prim_array(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let size = integer_arg("array", &args[0])?;
    let origin = match args.get(1) {
        Some(origin) => integer_arg("array", origin)?,
        None => 1,
    };
    new_array(interp.constants(), size, origin)
}

fn prim_count(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::number(count(&args[0]) as f64))
}

fn prim_emptyp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let value = &args[0];
    let empty = value.is_empty_list() || value.text().is_some_and(str::is_empty);
    Ok(Handle::boolean(empty))
}

fn prim_wordp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(args[0].is_word()))
}

fn prim_listp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(args[0].is_list()))
}

fn prim_arrayp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(args[0].is_array()))
}

fn prim_numberp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(args[0].as_number().is_some()))
}

fn prim_equalp(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(equal(&args[0], &args[1], interp.case_mode())))
}

fn prim_notequalp(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(!equal(&args[0], &args[1], interp.case_mode())))
}

fn prim_memberp(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(memberp(&args[0], &args[1], interp.case_mode())))
}

/// The tail of the container starting at `thing`, or an empty one.
fn prim_member(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    match member(&args[0], &args[1], interp.case_mode()) {
        Some(found) => Ok(found),
        None if args[1].is_word() => Ok(Handle::word("")),
        None => Ok(interp.constants().empty_list()),
    }
}

fn prim_ascii(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let text = word_arg("ascii", &args[0])?;
    match text.chars().next() {
        Some(c) => Ok(Handle::number(f64::from(u32::from(c)))),
        None => Err(doesnt_like("ascii", &args[0])),
    }
}

fn prim_char(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let code = integer_arg("char", &args[0])?;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(|c| Handle::word(c.to_string()))
        .ok_or_else(|| doesnt_like("char", &args[0]))
}

fn prim_uppercase(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::word(word_arg("uppercase", &args[0])?.to_uppercase()))
}

fn prim_lowercase(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::word(word_arg("lowercase", &args[0])?.to_lowercase()))
}
