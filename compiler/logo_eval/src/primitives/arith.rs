//! Arithmetic, comparison and logic.

use logo_value::{doesnt_like, Arity, EvalResult, Handle};

use super::{bool_arg, number_arg, Primitive, OUTPUTS};
use crate::interpreter::Interpreter;

pub(super) const PRIMITIVES: &[Primitive] = &[
    Primitive { names: &["sum"], arity: Arity::new(0, 2, None), capability: OUTPUTS, func: sum },
    Primitive { names: &["difference"], arity: Arity::fixed(2), capability: OUTPUTS, func: difference },
    Primitive { names: &["product"], arity: Arity::new(0, 2, None), capability: OUTPUTS, func: product },
    Primitive { names: &["quotient"], arity: Arity::new(1, 2, Some(2)), capability: OUTPUTS, func: quotient },
    Primitive { names: &["remainder"], arity: Arity::fixed(2), capability: OUTPUTS, func: remainder },
    Primitive { names: &["minus"], arity: Arity::fixed(1), capability: OUTPUTS, func: minus },
    Primitive { names: &["abs"], arity: Arity::fixed(1), capability: OUTPUTS, func: abs },
    Primitive { names: &["int"], arity: Arity::fixed(1), capability: OUTPUTS, func: int },
    Primitive { names: &["round"], arity: Arity::fixed(1), capability: OUTPUTS, func: round },
    Primitive { names: &["sqrt"], arity: Arity::fixed(1), capability: OUTPUTS, func: sqrt },
    Primitive { names: &["power"], arity: Arity::fixed(2), capability: OUTPUTS, func: power },
    Primitive { names: &["lessp", "less?"], arity: Arity::fixed(2), capability: OUTPUTS, func: lessp },
    Primitive { names: &["greaterp", "greater?"], arity: Arity::fixed(2), capability: OUTPUTS, func: greaterp },
    Primitive { names: &["lessequalp", "lessequal?"], arity: Arity::fixed(2), capability: OUTPUTS, func: lessequalp },
    Primitive { names: &["greaterequalp", "greaterequal?"], arity: Arity::fixed(2), capability: OUTPUTS, func: greaterequalp },
    Primitive { names: &["not"], arity: Arity::fixed(1), capability: OUTPUTS, func: not },
    Primitive { names: &["and"], arity: Arity::new(0, 2, None), capability: OUTPUTS, func: and },
    Primitive { names: &["or"], arity: Arity::new(0, 2, None), capability: OUTPUTS, func: or },
];

fn numbers(who: &str, args: &[Handle]) -> Result<Vec<f64>, logo_value::Unwind> {
    args.iter().map(|arg| number_arg(who, arg)).collect()
}

fn sum(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::number(numbers("sum", args)?.into_iter().sum()))
}

fn difference(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let a = number_arg("difference", &args[0])?;
    let b = number_arg("difference", &args[1])?;
    Ok(Handle::number(a - b))
}

fn product(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::number(numbers("product", args)?.into_iter().product()))
}

/// `QUOTIENT a b`, or `(QUOTIENT b)` for `1/b`.
fn quotient(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let (a, divisor) = match args {
        [b] => (1.0, b),
        [a, b, ..] => (number_arg("quotient", a)?, b),
        [] => return Err(logo_value::not_enough_inputs("quotient")),
    };
    let b = number_arg("quotient", divisor)?;
    if b == 0.0 {
        return Err(doesnt_like("quotient", divisor));
    }
    Ok(Handle::number(a / b))
}

/// Remainder with the sign of the dividend.
fn remainder(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let a = number_arg("remainder", &args[0])?;
    let b = number_arg("remainder", &args[1])?;
    if b == 0.0 {
        return Err(doesnt_like("remainder", &args[1]));
    }
    Ok(Handle::number(a % b))
}

fn minus(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::number(-number_arg("minus", &args[0])?))
}

fn abs(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::number(number_arg("abs", &args[0])?.abs()))
}

fn int(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::number(number_arg("int", &args[0])?.trunc()))
}

fn round(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::number(number_arg("round", &args[0])?.round()))
}

fn sqrt(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let n = number_arg("sqrt", &args[0])?;
    if n < 0.0 {
        return Err(doesnt_like("sqrt", &args[0]));
    }
    Ok(Handle::number(n.sqrt()))
}

fn power(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let base = number_arg("power", &args[0])?;
    let exponent = number_arg("power", &args[1])?;
    let result = base.powf(exponent);
    if !result.is_finite() {
        return Err(doesnt_like("power", &args[1]));
    }
    Ok(Handle::number(result))
}

fn compare(who: &str, args: &[Handle], test: fn(f64, f64) -> bool) -> EvalResult {
    let a = number_arg(who, &args[0])?;
    let b = number_arg(who, &args[1])?;
    Ok(Handle::boolean(test(a, b)))
}

fn lessp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    compare("lessp", args, |a, b| a < b)
}

fn greaterp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    compare("greaterp", args, |a, b| a > b)
}

fn lessequalp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    compare("lessequalp", args, |a, b| a <= b)
}

fn greaterequalp(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    compare("greaterequalp", args, |a, b| a >= b)
}

fn not(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    Ok(Handle::boolean(!bool_arg("not", &args[0])?))
}

fn and(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let mut result = true;
    for arg in args {
        result &= bool_arg("and", arg)?;
    }
    Ok(Handle::boolean(result))
}

fn or(_interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let mut result = false;
    for arg in args {
        result |= bool_arg("or", arg)?;
    }
    Ok(Handle::boolean(result))
}
