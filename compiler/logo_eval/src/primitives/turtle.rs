//! Turtle graphics.

use std::path::Path;

use logo_value::{doesnt_like, file_system, Arity, EvalResult, Handle};

use super::{index_arg, list_arg, number_arg, word_arg, Primitive, COMMAND, MAY_OUTPUT, OUTPUTS};
use crate::canvas::PALETTE;
use crate::interpreter::{Interpreter, RunMode};

pub(super) const PRIMITIVES: &[Primitive] = &[
    Primitive { names: &["forward", "fd"], arity: Arity::fixed(1), capability: COMMAND, func: forward },
    Primitive { names: &["back", "bk"], arity: Arity::fixed(1), capability: COMMAND, func: back },
    Primitive { names: &["left", "lt"], arity: Arity::fixed(1), capability: COMMAND, func: left },
    Primitive { names: &["right", "rt"], arity: Arity::fixed(1), capability: COMMAND, func: right },
    Primitive { names: &["setxy"], arity: Arity::fixed(2), capability: COMMAND, func: setxy },
    Primitive { names: &["setheading", "seth"], arity: Arity::fixed(1), capability: COMMAND, func: setheading },
    Primitive { names: &["home"], arity: Arity::fixed(0), capability: COMMAND, func: home },
    Primitive { names: &["penup", "pu"], arity: Arity::fixed(0), capability: COMMAND, func: penup },
    Primitive { names: &["pendown", "pd"], arity: Arity::fixed(0), capability: COMMAND, func: pendown },
    Primitive { names: &["setpencolor", "setpc"], arity: Arity::fixed(1), capability: COMMAND, func: setpencolor },
    Primitive { names: &["pencolor", "pc"], arity: Arity::fixed(0), capability: OUTPUTS, func: pencolor },
    Primitive { names: &["setbackground", "setbg"], arity: Arity::fixed(1), capability: COMMAND, func: setbackground },
    Primitive { names: &["background", "bg"], arity: Arity::fixed(0), capability: OUTPUTS, func: background },
    Primitive { names: &["palette"], arity: Arity::fixed(1), capability: OUTPUTS, func: palette },
    Primitive { names: &["label"], arity: Arity::fixed(1), capability: COMMAND, func: label },
    Primitive { names: &["clearscreen", "cs"], arity: Arity::fixed(0), capability: COMMAND, func: clearscreen },
    Primitive { names: &["pos"], arity: Arity::fixed(0), capability: OUTPUTS, func: pos },
    Primitive { names: &["heading"], arity: Arity::fixed(0), capability: OUTPUTS, func: heading },
    Primitive { names: &["setbounds"], arity: Arity::fixed(2), capability: COMMAND, func: setbounds },
    Primitive { names: &["filled"], arity: Arity::fixed(2), capability: MAY_OUTPUT, func: filled },
    Primitive { names: &["savepict"], arity: Arity::fixed(1), capability: COMMAND, func: savepict },
];

fn forward(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let distance = number_arg("forward", &args[0])?;
    interp.canvas_mut().forward(distance);
    Ok(interp.nothing())
}

fn back(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let distance = number_arg("back", &args[0])?;
    interp.canvas_mut().forward(-distance);
    Ok(interp.nothing())
}

fn left(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let degrees = number_arg("left", &args[0])?;
    interp.canvas_mut().right(-degrees);
    Ok(interp.nothing())
}

fn right(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let degrees = number_arg("right", &args[0])?;
    interp.canvas_mut().right(degrees);
    Ok(interp.nothing())
}

fn setxy(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let x = number_arg("setxy", &args[0])?;
    let y = number_arg("setxy", &args[1])?;
    interp.canvas_mut().set_xy(x, y);
    Ok(interp.nothing())
}

fn setheading(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let degrees = number_arg("setheading", &args[0])?;
    interp.canvas_mut().set_heading(degrees);
    Ok(interp.nothing())
}

fn home(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    interp.canvas_mut().home();
    Ok(interp.nothing())
}

fn penup(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    interp.canvas_mut().set_pen_down(false);
    Ok(interp.nothing())
}

fn pendown(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    interp.canvas_mut().set_pen_down(true);
    Ok(interp.nothing())
}

fn setpencolor(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let color = index_arg("setpencolor", &args[0])?;
    interp.canvas_mut().set_pen_color(color);
    Ok(interp.nothing())
}

#[expect(clippy::cast_precision_loss, reason = "palette indices are below 16")]
fn color_word(index: usize) -> Handle {
    Handle::number(index as f64)
}

fn pencolor(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Ok(color_word(interp.canvas().pen_color()))
}

fn setbackground(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let color = index_arg("setbackground", &args[0])?;
    interp.canvas_mut().set_background(color);
    Ok(interp.nothing())
}

fn background(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Ok(color_word(interp.canvas().background()))
}

/// `PALETTE n`: the colour's `[red green blue]` percentages.
fn palette(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let index = index_arg("palette", &args[0])?;
    let Some(rgb) = PALETTE.get(index) else {
        return Err(doesnt_like("palette", &args[0]));
    };
    let items = rgb.map(|c| Handle::number(f64::from(c)));
    Ok(interp.constants().list(items))
}

fn label(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let text = interp.render(&args[0], logo_value::PrintFlags::empty());
    interp.canvas_mut().label(&text);
    Ok(interp.nothing())
}

fn clearscreen(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    interp.canvas_mut().clear_screen();
    Ok(interp.nothing())
}

fn pos(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    let (x, y) = interp.canvas().position();
    Ok(interp.constants().list([Handle::number(x), Handle::number(y)]))
}

fn heading(interp: &mut Interpreter, _args: &[Handle]) -> EvalResult {
    Ok(Handle::number(interp.canvas().heading()))
}

fn setbounds(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let width = number_arg("setbounds", &args[0])?;
    let height = number_arg("setbounds", &args[1])?;
    if width <= 0.0 || height <= 0.0 {
        return Err(doesnt_like("setbounds", if width <= 0.0 { &args[0] } else { &args[1] }));
    }
    interp.canvas_mut().set_bounds(width, height);
    Ok(interp.nothing())
}

/// `FILLED color list`: run the list, then fill the shape its moves traced.
fn filled(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let color = index_arg("filled", &args[0])?;
    let body = list_arg("filled", &args[1])?;
    interp.canvas_mut().begin_fill();
    let result = interp.run_list(body, RunMode::Expression);
    interp.canvas_mut().end_fill(color);
    result
}

fn savepict(interp: &mut Interpreter, args: &[Handle]) -> EvalResult {
    let path = word_arg("savepict", &args[0])?;
    interp
        .canvas()
        .save_svg(Path::new(path))
        .map_err(|err| file_system(format_args!("{path}: {err}")))?;
    Ok(interp.nothing())
}
