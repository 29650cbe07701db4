//! Control structures.
//!
//! OUTPUT, STOP and GOTO return their control value as `Err`; the
//! enclosing activation picks it up. THROW builds its error through
//! [`Interpreter::throw`] so the tag is classified against the live
//! catches.

use std::time::Duration;

use logo_value::{
    doesnt_like, fold_name, iftrue_without_test, outside_procedure, terminate, to_inside_procedure, Arity,
    EvalResult, Handle, Unwind,
};

use super::{
    bool_arg, integer_arg, list_arg, number_arg, word_arg, Primitive, COMMAND, CONTROL,
    MAY_OUTPUT, OUTPUTS, SUSPENDS,
};
use crate::interpreter::{Interpreter, RunMode};

pub(super) const PRIMITIVES: &[Primitive] = &[
    Primitive { names: &["run"], arity: Arity::fixed(1), capability: MAY_OUTPUT, func: run },
    Primitive { names: &["repeat"], arity: Arity::fixed(2), capability: CONTROL, func: repeat },
    Primitive { names: &["repcount"], arity: Arity::fixed(0), capability: OUTPUTS, func: repcount },
    Primitive { names: &["if"], arity: Arity::new(2, 2, Some(3)), capability: MAY_OUTPUT, func: prim_if },
    Primitive { names: &["ifelse"], arity: Arity::fixed(3), capability: MAY_OUTPUT, func: ifelse },
    Primitive { names: &["test"], arity: Arity::fixed(1), capability: COMMAND, func: test },
    Primitive { names: &["iftrue", "ift"], arity: Arity::fixed(1), capability: MAY_OUTPUT, func: iftrue },
    Primitive { names: &["iffalse", "iff"], arity: Arity::fixed(1), capability: MAY_OUTPUT, func: iffalse },
    Primitive { names: &["stop"], arity: Arity::fixed(0), capability: CONTROL, func: stop },
    Primitive { names: &["output", "op"], arity: Arity::fixed(1), capability: CONTROL, func: output },
    Primitive { names: &["catch"], arity: Arity::fixed(2), capability: MAY_OUTPUT, func: catch },
    Primitive { names: &["throw"], arity: Arity::new(1, 1, Some(2)), capability: CONTROL, func: prim_throw },
    Primitive { names: &["error"], arity: Arity::fixed(0), capability: OUTPUTS, func: error },
    Primitive { names: &["goto"], arity: Arity::fixed(1), capability: CONTROL, func: goto },
    Primitive { names: &["tag"], arity: Arity::fixed(1), capability: COMMAND, func: tag },
    Primitive { names: &["pause"], arity: Arity::fixed(0), capability: SUSPENDS.union(MAY_OUTPUT), func: pause },
    Primitive { names: &["continue", "co"], arity: Arity::new(0, 1, Some(1)), capability: COMMAND, func: prim_continue },
    Primitive { names: &[".resume"], arity: Arity::fixed(1), capability: OUTPUTS, func: resume },
    Primitive { names: &["bye"], arity: Arity::fixed(0), capability: CONTROL, func: bye },
    Primitive { names: &["wait"], arity: Arity::fixed(1), capability: SUSPENDS, func: wait },
    Primitive { names: &["apply"], arity: Arity::fixed(2), capability: MAY_OUTPUT, func: apply },
    Primitive { names: &["invoke"], arity: Arity::new(1, 2, None), capability: MAY_OUTPUT, func: invoke },
    Primitive { names: &["to"], arity: Arity::fixed(0), capability: COMMAND, func: to },
    Primitive { names: &[".macro"], arity: Arity::fixed(0), capability: COMMAND, func: to },
];

fn run(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    interp.run_list(&args[0], RunMode::Expression)
}

fn repeat(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let times = integer_arg("repeat", &args[0])?;
    let body = &args[1];
    interp.repcounts.push(0);
    let mut result = Ok(interp.nothing());
    for iteration in 1..=times {
        if let Some(counter) = interp.repcounts.last_mut() {
            *counter = iteration;
        }
        result = interp.run_list(body, RunMode::Command);
        if result.is_err() {
            break;
        }
    }
    interp.repcounts.pop();
    result
}

#[expect(clippy::cast_precision_loss, reason = "iteration counts are small")]
fn repcount(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Ok(Handle::number(interp.repcount() as f64))
}

fn prim_if(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    if bool_arg("if", &args[0])? {
        interp.run_list(&args[1], RunMode::Expression)
    } else if let Some(otherwise) = args.get(2) {
        interp.run_list(otherwise, RunMode::Expression)
    } else {
        Ok(interp.nothing())
    }
}

fn ifelse(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let branch = if bool_arg("ifelse", &args[0])? { &args[1] } else { &args[2] };
    interp.run_list(branch, RunMode::Expression)
}

fn test(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let result = bool_arg("test", &args[0])?;
    interp.set_test(result);
    Ok(interp.nothing())
}

fn run_if_tested(interp: &mut Interpreter, who: &str, list: &Handle, wanted: bool) -> EvalResult {
    match interp.test_result() {
        None => Err(iftrue_without_test(who)),
        Some(result) if result == wanted => interp.run_list(list, RunMode::Expression),
        Some(_) => Ok(interp.nothing()),
    }
}

fn iftrue(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    run_if_tested(interp, "iftrue", &args[0], true)
}

fn iffalse(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    run_if_tested(interp, "iffalse", &args[0], false)
}

fn stop(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    if !interp.frames().in_procedure() {
        return Err(outside_procedure("stop"));
    }
    Err(Unwind::ret(interp.nothing()))
}

fn output(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    if !interp.frames().in_procedure() {
        return Err(outside_procedure("output"));
    }
    Err(Unwind::ret(args[0].clone()))
}

fn catch(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let tag = word_arg("catch", &args[0])?;
    let body = list_arg("catch", &args[1])?;
    interp.catch(tag, body)
}

fn prim_throw(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let tag = word_arg("throw", &args[0])?;
    Err(interp.throw(tag, args.get(1).cloned()))
}

fn error(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Ok(interp.error_list())
}

fn goto(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let tag = word_arg("goto", &args[0])?;
    if !interp.frames().in_procedure() {
        return Err(outside_procedure("goto"));
    }
    Err(Unwind::goto(fold_name(tag)))
}

/// TAG only marks a line; the tag table is built at definition time.
fn tag(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    word_arg("tag", &args[0])?;
    Ok(interp.nothing())
}

fn pause(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    interp.pause()
}

fn prim_continue(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let value = args.first().cloned().unwrap_or_else(|| interp.nothing());
    interp.continue_pause(value)?;
    Ok(interp.nothing())
}

fn resume(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(args[0].clone())
}

fn bye(_interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Err(terminate())
}

/// `WAIT n`: sleep for n sixtieths of a second, then check for signals.
/// A delay too long to represent is refused.
fn wait(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let ticks = number_arg("wait", &args[0])?;
    if ticks > 0.0 {
        let Ok(delay) = Duration::try_from_secs_f64(ticks / 60.0) else {
            return Err(doesnt_like("wait", &args[0]));
        };
        std::thread::sleep(delay);
    }
    interp.yield_now()?;
    Ok(interp.nothing())
}

fn apply(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let inputs = list_arg("apply", &args[1])?.to_vec();
    interp.call_value(&args[0], &inputs)
}

fn invoke(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    interp.call_value(&args[0], &args[1..])
}

/// TO reaches the evaluator only when it appears inside a procedure body
/// or an instruction list; the top level handles definitions itself.
fn to(_interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Err(to_inside_procedure())
}
