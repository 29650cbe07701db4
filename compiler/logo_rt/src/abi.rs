//! The `extern "C"` entry points.
//!
//! Conventions: the context pointer comes first; values are
//! [`ValueRef`]s; booleans are `i8` (1 true, 0 false); numbers are `f64`;
//! text is a `(ptr, len)` UTF-8 pair. A null context or a dead reference
//! yields the entry point's failure value: `ValueRef::NULL`, 0, NaN, or
//! -1 where 0 is meaningful.

use std::path::Path;

use logo_value::{
    butfirst, butlast, count, didnt_output, doesnt_like, dont_know_how, equal, file_system,
    first, fold_name, item, last, member, memberp, new_array, no_tag, no_value,
    not_enough_inputs, set_butfirst, set_first, set_item, user_error, CaseMode, EvalResult, Handle, PrintFlags,
    Unwind,
};

use logo_eval::{RunMode, PALETTE};

use crate::{RtContext, ValueRef};

// ── Pointer handling ─────────────────────────────────────────────────────

fn context<'c, 'a>(ctx: *mut RtContext<'a>) -> Option<&'c mut RtContext<'a>> {
    // SAFETY: generated code passes back the pointer `NativeEntry` handed
    // it, which stays valid and unaliased for the whole activation.
    unsafe { ctx.as_mut() }
}

fn text<'t>(ptr: *const u8, len: usize) -> Option<&'t str> {
    if ptr.is_null() {
        return (len == 0).then_some("");
    }
    // SAFETY: the caller passes a buffer of `len` readable bytes.
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
    std::str::from_utf8(bytes).ok()
}

fn refs<'t>(ptr: *const ValueRef, len: usize) -> Option<&'t [ValueRef]> {
    if ptr.is_null() {
        return (len == 0).then_some(&[]);
    }
    // SAFETY: the caller passes an array of `len` references.
    Some(unsafe { std::slice::from_raw_parts(ptr, len) })
}

fn case_mode(case_sensitive: i8) -> CaseMode {
    if case_sensitive == 0 {
        CaseMode::Ignore
    } else {
        CaseMode::Sensitive
    }
}

fn flag(b: bool) -> i8 {
    i8::from(b)
}

// Shapes shared by many entry points.

fn with_value<R>(
    ctx: *mut RtContext<'_>,
    value: ValueRef,
    failure: R,
    f: impl FnOnce(&mut RtContext<'_>, Handle) -> R,
) -> R {
    let Some(ctx) = context(ctx) else {
        return failure;
    };
    match ctx.value(value) {
        Some(handle) => f(ctx, handle),
        None => failure,
    }
}

fn unary(
    ctx: *mut RtContext<'_>,
    value: ValueRef,
    f: impl FnOnce(&mut RtContext<'_>, &Handle) -> EvalResult,
) -> ValueRef {
    with_value(ctx, value, ValueRef::NULL, |ctx, handle| {
        let result = f(ctx, &handle);
        ctx.register_result(result)
    })
}

fn binary(
    ctx: *mut RtContext<'_>,
    a: ValueRef,
    b: ValueRef,
    f: impl FnOnce(&mut RtContext<'_>, &Handle, &Handle) -> EvalResult,
) -> ValueRef {
    let Some(ctx) = context(ctx) else {
        return ValueRef::NULL;
    };
    let (Some(a), Some(b)) = (ctx.value(a), ctx.value(b)) else {
        return ValueRef::NULL;
    };
    let result = f(ctx, &a, &b);
    ctx.register_result(result)
}

fn with_text(
    ctx: *mut RtContext<'_>,
    ptr: *const u8,
    len: usize,
    f: impl FnOnce(&mut RtContext<'_>, &str) -> EvalResult,
) -> ValueRef {
    let Some(ctx) = context(ctx) else {
        return ValueRef::NULL;
    };
    let Some(text) = text(ptr, len) else {
        return ValueRef::NULL;
    };
    let result = f(ctx, text);
    ctx.register_result(result)
}

fn unit(ctx: &RtContext<'_>, result: Result<(), Unwind>) -> EvalResult {
    result.map(|()| ctx.interp.nothing())
}

// ── Introspection ────────────────────────────────────────────────────────

/// Numeric value of a word, or NaN. See [`logo_rt_is_number`].
#[no_mangle]
pub extern "C" fn logo_rt_number(ctx: *mut RtContext<'_>, value: ValueRef) -> f64 {
    with_value(ctx, value, f64::NAN, |_, v| v.as_number().unwrap_or(f64::NAN))
}

#[no_mangle]
pub extern "C" fn logo_rt_is_number(ctx: *mut RtContext<'_>, value: ValueRef) -> i8 {
    with_value(ctx, value, 0, |_, v| flag(v.as_number().is_some()))
}

/// Boolean value of a word, or 0. See [`logo_rt_is_bool`].
#[no_mangle]
pub extern "C" fn logo_rt_bool(ctx: *mut RtContext<'_>, value: ValueRef) -> i8 {
    with_value(ctx, value, 0, |_, v| flag(v.as_bool() == Some(true)))
}

#[no_mangle]
pub extern "C" fn logo_rt_is_bool(ctx: *mut RtContext<'_>, value: ValueRef) -> i8 {
    with_value(ctx, value, 0, |_, v| flag(v.as_bool().is_some()))
}

/// Is this a control value that must be returned unchanged?
#[no_mangle]
pub extern "C" fn logo_rt_is_control(ctx: *mut RtContext<'_>, value: ValueRef) -> i8 {
    with_value(ctx, value, 0, |_, v| flag(v.is_control()))
}

#[no_mangle]
pub extern "C" fn logo_rt_is_nothing(ctx: *mut RtContext<'_>, value: ValueRef) -> i8 {
    with_value(ctx, value, 0, |_, v| flag(v.is_nothing()))
}

/// Error code of an error value, or 0.
#[no_mangle]
pub extern "C" fn logo_rt_error_code(ctx: *mut RtContext<'_>, value: ValueRef) -> i32 {
    with_value(ctx, value, 0, |_, v| {
        Unwind::from_handle(v)
            .and_then(|unwind| unwind.as_error().map(logo_value::ErrorPayload::code))
            .unwrap_or(0)
    })
}

/// A variable's value, or a "has no value" error.
#[no_mangle]
pub extern "C" fn logo_rt_lookup(ctx: *mut RtContext<'_>, name: *const u8, len: usize) -> ValueRef {
    with_text(ctx, name, len, |ctx, name| ctx.interp.thing(name))
}

/// MAKE: assign in the innermost frame that binds `name`, else globally.
#[no_mangle]
pub extern "C" fn logo_rt_make(
    ctx: *mut RtContext<'_>,
    name: *const u8,
    len: usize,
    value: ValueRef,
) -> i8 {
    let Some(name) = text(name, len) else {
        return 0;
    };
    with_value(ctx, value, 0, |ctx, v| {
        ctx.interp.frames_mut().assign(name, v);
        1
    })
}

/// Bind a local in the running procedure's frame.
#[no_mangle]
pub extern "C" fn logo_rt_local(
    ctx: *mut RtContext<'_>,
    name: *const u8,
    len: usize,
    value: ValueRef,
) -> i8 {
    let Some(name) = text(name, len) else {
        return 0;
    };
    with_value(ctx, value, 0, |ctx, v| {
        ctx.interp.frames_mut().bind_local(name, v);
        1
    })
}

// ── Construction and mutation ────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn logo_rt_word(ctx: *mut RtContext<'_>, ptr: *const u8, len: usize) -> ValueRef {
    with_text(ctx, ptr, len, |_, text| Ok(Handle::word(text)))
}

#[no_mangle]
pub extern "C" fn logo_rt_make_number(ctx: *mut RtContext<'_>, n: f64) -> ValueRef {
    context(ctx).map_or(ValueRef::NULL, |ctx| ctx.register(Handle::number(n)))
}

#[no_mangle]
pub extern "C" fn logo_rt_make_bool(ctx: *mut RtContext<'_>, b: i8) -> ValueRef {
    context(ctx).map_or(ValueRef::NULL, |ctx| ctx.register(Handle::boolean(b != 0)))
}

#[no_mangle]
pub extern "C" fn logo_rt_nothing(ctx: *mut RtContext<'_>) -> ValueRef {
    context(ctx).map_or(ValueRef::NULL, |ctx| {
        let nothing = ctx.interp.nothing();
        ctx.register(nothing)
    })
}

#[no_mangle]
pub extern "C" fn logo_rt_empty_list(ctx: *mut RtContext<'_>) -> ValueRef {
    context(ctx).map_or(ValueRef::NULL, |ctx| {
        let empty = ctx.interp.constants().empty_list();
        ctx.register(empty)
    })
}

/// A new cell with `head` in front of the list `tail`.
#[no_mangle]
pub extern "C" fn logo_rt_cons(ctx: *mut RtContext<'_>, head: ValueRef, tail: ValueRef) -> ValueRef {
    binary(ctx, head, tail, |_, head, tail| {
        if tail.is_list() {
            Ok(Handle::cons(head.clone(), tail.clone()))
        } else {
            Err(doesnt_like("fput", tail))
        }
    })
}

/// A fresh list of `len` items.
#[no_mangle]
pub extern "C" fn logo_rt_list(ctx: *mut RtContext<'_>, items: *const ValueRef, len: usize) -> ValueRef {
    let Some(ctx) = context(ctx) else {
        return ValueRef::NULL;
    };
    let Some(items) = refs(items, len) else {
        return ValueRef::NULL;
    };
    let Some(values) = items.iter().map(|r| ctx.value(*r)).collect::<Option<Vec<_>>>() else {
        return ValueRef::NULL;
    };
    let list = ctx.interp.constants().list(values);
    ctx.register(list)
}

/// A fresh array of `size` empty lists.
#[no_mangle]
pub extern "C" fn logo_rt_array(ctx: *mut RtContext<'_>, size: i64, origin: i64) -> ValueRef {
    let Some(ctx) = context(ctx) else {
        return ValueRef::NULL;
    };
    let result = new_array(ctx.interp.constants(), size, origin);
    ctx.register_result(result)
}

#[no_mangle]
pub extern "C" fn logo_rt_first(ctx: *mut RtContext<'_>, value: ValueRef) -> ValueRef {
    unary(ctx, value, |_, v| first(v))
}

#[no_mangle]
pub extern "C" fn logo_rt_last(ctx: *mut RtContext<'_>, value: ValueRef) -> ValueRef {
    unary(ctx, value, |_, v| last(v))
}

#[no_mangle]
pub extern "C" fn logo_rt_butfirst(ctx: *mut RtContext<'_>, value: ValueRef) -> ValueRef {
    unary(ctx, value, |_, v| butfirst(v))
}

#[no_mangle]
pub extern "C" fn logo_rt_butlast(ctx: *mut RtContext<'_>, value: ValueRef) -> ValueRef {
    unary(ctx, value, |ctx, v| butlast(ctx.interp.constants(), v))
}

/// ITEM with bounds checking; out of range is an error value.
#[no_mangle]
pub extern "C" fn logo_rt_item(ctx: *mut RtContext<'_>, index: ValueRef, container: ValueRef) -> ValueRef {
    binary(ctx, index, container, |_, index, container| item(index, container))
}

#[no_mangle]
pub extern "C" fn logo_rt_set_item(
    ctx: *mut RtContext<'_>,
    index: ValueRef,
    array: ValueRef,
    value: ValueRef,
) -> ValueRef {
    let Some(value) = context(ctx).and_then(|c| c.value(value)) else {
        return ValueRef::NULL;
    };
    binary(ctx, index, array, |ctx, index, array| {
        unit(ctx, set_item(index, array, &value))
    })
}

/// `.SETFIRST`: replace the head of a list cell in place.
#[no_mangle]
pub extern "C" fn logo_rt_set_first(ctx: *mut RtContext<'_>, list: ValueRef, value: ValueRef) -> ValueRef {
    binary(ctx, list, value, |ctx, list, value| unit(ctx, set_first(list, value)))
}

/// `.SETBF`: replace the tail of a list cell in place.
#[no_mangle]
pub extern "C" fn logo_rt_set_butfirst(ctx: *mut RtContext<'_>, list: ValueRef, value: ValueRef) -> ValueRef {
    binary(ctx, list, value, |ctx, list, value| unit(ctx, set_butfirst(list, value)))
}

/// COUNT, or -1 for a bad reference.
#[no_mangle]
pub extern "C" fn logo_rt_count(ctx: *mut RtContext<'_>, value: ValueRef) -> i64 {
    with_value(ctx, value, -1, |_, v| i64::try_from(count(&v)).unwrap_or(i64::MAX))
}

// ── Control values ───────────────────────────────────────────────────────

/// OUTPUT `value`.
#[no_mangle]
pub extern "C" fn logo_rt_return(ctx: *mut RtContext<'_>, value: ValueRef) -> ValueRef {
    unary(ctx, value, |_, v| Err(Unwind::ret(v.clone())))
}

/// STOP.
#[no_mangle]
pub extern "C" fn logo_rt_stop(ctx: *mut RtContext<'_>) -> ValueRef {
    context(ctx).map_or(ValueRef::NULL, |ctx| {
        let nothing = ctx.interp.nothing();
        ctx.register(Unwind::ret(nothing).into_handle())
    })
}

/// Invoke `target` with the list `args` in place of this activation.
#[no_mangle]
pub extern "C" fn logo_rt_continuation(ctx: *mut RtContext<'_>, target: ValueRef, args: ValueRef) -> ValueRef {
    binary(ctx, target, args, |_, target, args| {
        if args.is_list() {
            Err(Unwind::continuation(target.clone(), args.clone()))
        } else {
            Err(doesnt_like("apply", args))
        }
    })
}

#[no_mangle]
pub extern "C" fn logo_rt_goto(ctx: *mut RtContext<'_>, tag: *const u8, len: usize) -> ValueRef {
    with_text(ctx, tag, len, |_, tag| Err(Unwind::goto(fold_name(tag))))
}

/// THROW `tag`, with `value` unless it is NULL. The tag is classified
/// against the active catches exactly as the THROW primitive does.
#[no_mangle]
pub extern "C" fn logo_rt_throw(ctx: *mut RtContext<'_>, tag: *const u8, len: usize, value: ValueRef) -> ValueRef {
    with_text(ctx, tag, len, |ctx, tag| {
        let value = ctx.value(value);
        Err(ctx.interp.throw(tag, value))
    })
}

#[no_mangle]
pub extern "C" fn logo_rt_error_doesnt_like(
    ctx: *mut RtContext<'_>,
    procedure: *const u8,
    len: usize,
    datum: ValueRef,
) -> ValueRef {
    with_text(ctx, procedure, len, |ctx, procedure| {
        let datum = ctx.value(datum).unwrap_or_else(|| ctx.interp.nothing());
        Err(doesnt_like(procedure, &datum))
    })
}

#[no_mangle]
pub extern "C" fn logo_rt_error_didnt_output(
    ctx: *mut RtContext<'_>,
    procedure: *const u8,
    len: usize,
    to: *const u8,
    to_len: usize,
) -> ValueRef {
    let Some(to) = text(to, to_len) else {
        return ValueRef::NULL;
    };
    with_text(ctx, procedure, len, |_, procedure| Err(didnt_output(procedure, to)))
}

#[no_mangle]
pub extern "C" fn logo_rt_error_not_enough_inputs(ctx: *mut RtContext<'_>, procedure: *const u8, len: usize) -> ValueRef {
    with_text(ctx, procedure, len, |_, procedure| Err(not_enough_inputs(procedure)))
}

#[no_mangle]
pub extern "C" fn logo_rt_error_no_value(ctx: *mut RtContext<'_>, name: *const u8, len: usize) -> ValueRef {
    with_text(ctx, name, len, |_, name| Err(no_value(name)))
}

#[no_mangle]
pub extern "C" fn logo_rt_error_dont_know_how(ctx: *mut RtContext<'_>, name: *const u8, len: usize) -> ValueRef {
    with_text(ctx, name, len, |_, name| Err(dont_know_how(name)))
}

#[no_mangle]
pub extern "C" fn logo_rt_error_no_tag(ctx: *mut RtContext<'_>, tag: *const u8, len: usize) -> ValueRef {
    with_text(ctx, tag, len, |_, tag| Err(no_tag(tag)))
}

#[no_mangle]
pub extern "C" fn logo_rt_error_custom(ctx: *mut RtContext<'_>, message: *const u8, len: usize) -> ValueRef {
    with_text(ctx, message, len, |_, message| Err(user_error(message)))
}

#[no_mangle]
pub extern "C" fn logo_rt_error_file_system(ctx: *mut RtContext<'_>, detail: *const u8, len: usize) -> ValueRef {
    with_text(ctx, detail, len, |_, detail| Err(file_system(detail)))
}

// ── Calls ────────────────────────────────────────────────────────────────

/// Call a procedure by name with the items of `args`.
#[no_mangle]
pub extern "C" fn logo_rt_call(ctx: *mut RtContext<'_>, name: *const u8, len: usize, args: ValueRef) -> ValueRef {
    let Some(args) = context(ctx).and_then(|c| c.value(args)) else {
        return ValueRef::NULL;
    };
    with_text(ctx, name, len, |ctx, name| {
        ctx.interp.call_procedure(name, &args.to_vec())
    })
}

/// RUN an instruction list; its last value, if any, is the result.
#[no_mangle]
pub extern "C" fn logo_rt_run(ctx: *mut RtContext<'_>, list: ValueRef) -> ValueRef {
    unary(ctx, list, |ctx, list| ctx.interp.run_list(list, RunMode::Expression))
}

// ── Comparison and containment ───────────────────────────────────────────

#[no_mangle]
pub extern "C" fn logo_rt_equal(ctx: *mut RtContext<'_>, a: ValueRef, b: ValueRef, case_sensitive: i8) -> i8 {
    let Some(ctx) = context(ctx) else {
        return 0;
    };
    match (ctx.value(a), ctx.value(b)) {
        (Some(a), Some(b)) => flag(equal(&a, &b, case_mode(case_sensitive))),
        _ => 0,
    }
}

#[no_mangle]
pub extern "C" fn logo_rt_memberp(
    ctx: *mut RtContext<'_>,
    thing: ValueRef,
    container: ValueRef,
    case_sensitive: i8,
) -> i8 {
    let Some(ctx) = context(ctx) else {
        return 0;
    };
    match (ctx.value(thing), ctx.value(container)) {
        (Some(thing), Some(container)) => {
            flag(memberp(&thing, &container, case_mode(case_sensitive)))
        }
        _ => 0,
    }
}

/// MEMBER: the tail of `container` starting at `thing`, or an empty one.
#[no_mangle]
pub extern "C" fn logo_rt_member(
    ctx: *mut RtContext<'_>,
    thing: ValueRef,
    container: ValueRef,
    case_sensitive: i8,
) -> ValueRef {
    binary(ctx, thing, container, |ctx, thing, container| {
        Ok(match member(thing, container, case_mode(case_sensitive)) {
            Some(found) => found,
            None if container.is_word() => Handle::word(""),
            None => ctx.interp.constants().empty_list(),
        })
    })
}

// ── CATCH and TEST bookkeeping ───────────────────────────────────────────

#[no_mangle]
pub extern "C" fn logo_rt_begin_catch(ctx: *mut RtContext<'_>, tag: *const u8, len: usize) -> i8 {
    let (Some(ctx), Some(tag)) = (context(ctx), text(tag, len)) else {
        return 0;
    };
    ctx.interp.begin_catch(tag);
    1
}

/// Close the innermost CATCH and classify the body's result.
#[no_mangle]
pub extern "C" fn logo_rt_end_catch(
    ctx: *mut RtContext<'_>,
    result: ValueRef,
    tag: *const u8,
    len: usize,
) -> ValueRef {
    let Some(result) = context(ctx).and_then(|c| c.value(result)) else {
        return ValueRef::NULL;
    };
    with_text(ctx, tag, len, |ctx, tag| {
        let body = match Unwind::from_handle(result.clone()) {
            Some(unwind) => Err(unwind),
            None => Ok(result),
        };
        ctx.interp.end_catch(body, tag)
    })
}

#[no_mangle]
pub extern "C" fn logo_rt_set_test(ctx: *mut RtContext<'_>, result: i8) {
    if let Some(ctx) = context(ctx) {
        ctx.interp.set_test(result != 0);
    }
}

/// The most recent TEST: 1, 0, or -1 when there is none.
#[no_mangle]
pub extern "C" fn logo_rt_test_result(ctx: *mut RtContext<'_>) -> i8 {
    match context(ctx).and_then(|ctx| ctx.interp.test_result()) {
        Some(result) => flag(result),
        None => -1,
    }
}

/// Pin a value beyond the watch list. 1 on success.
#[no_mangle]
pub extern "C" fn logo_rt_retain(ctx: *mut RtContext<'_>, value: ValueRef) -> i8 {
    context(ctx).map_or(0, |ctx| flag(ctx.table.retain(value)))
}

/// Drop a pin taken by [`logo_rt_retain`]. 1 on success.
#[no_mangle]
pub extern "C" fn logo_rt_release(ctx: *mut RtContext<'_>, value: ValueRef) -> i8 {
    context(ctx).map_or(0, |ctx| flag(ctx.table.release(value)))
}

// ── Console ──────────────────────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn logo_rt_print(ctx: *mut RtContext<'_>, ptr: *const u8, len: usize) {
    if let (Some(ctx), Some(text)) = (context(ctx), text(ptr, len)) {
        ctx.interp.print(text);
    }
}

/// PRINT a value: no outer brackets, then a newline.
#[no_mangle]
pub extern "C" fn logo_rt_print_value(ctx: *mut RtContext<'_>, value: ValueRef) {
    with_value(ctx, value, (), |ctx, v| {
        let mut line = ctx.interp.render(&v, PrintFlags::empty());
        line.push('\n');
        ctx.interp.print(&line);
    });
}

/// Read a line as a word. The empty word at end of input; a signal
/// received while waiting comes back as an error value.
#[no_mangle]
pub extern "C" fn logo_rt_request_line(ctx: *mut RtContext<'_>, prompt: *const u8, len: usize) -> ValueRef {
    with_text(ctx, prompt, len, |ctx, prompt| {
        let line = ctx.interp.request_line(prompt)?;
        Ok(Handle::word(line.unwrap_or_default()))
    })
}

#[no_mangle]
pub extern "C" fn logo_rt_request_char(ctx: *mut RtContext<'_>) -> ValueRef {
    let Some(ctx) = context(ctx) else {
        return ValueRef::NULL;
    };
    let result = ctx
        .interp
        .request_char()
        .map(|c| Handle::word(c.map(String::from).unwrap_or_default()));
    ctx.register_result(result)
}

/// Let queued signals in. Nothing, or the error a signal raises.
#[no_mangle]
pub extern "C" fn logo_rt_yield(ctx: *mut RtContext<'_>) -> ValueRef {
    let Some(ctx) = context(ctx) else {
        return ValueRef::NULL;
    };
    let nothing = ctx.interp.nothing();
    let result = ctx.interp.yield_now().map(|()| nothing);
    ctx.register_result(result)
}

// ── Turtle and picture ───────────────────────────────────────────────────

fn with_canvas(ctx: *mut RtContext<'_>, f: impl FnOnce(&mut logo_eval::Canvas)) {
    if let Some(ctx) = context(ctx) {
        f(ctx.interp.canvas_mut());
    }
}

fn color_index(index: i64) -> usize {
    let len = i64::try_from(PALETTE.len()).unwrap_or(16);
    usize::try_from(index.rem_euclid(len)).unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn logo_rt_forward(ctx: *mut RtContext<'_>, distance: f64) {
    with_canvas(ctx, |canvas| canvas.forward(distance));
}

/// Turn clockwise; negative degrees turn left.
#[no_mangle]
pub extern "C" fn logo_rt_right(ctx: *mut RtContext<'_>, degrees: f64) {
    with_canvas(ctx, |canvas| canvas.right(degrees));
}

#[no_mangle]
pub extern "C" fn logo_rt_set_heading(ctx: *mut RtContext<'_>, degrees: f64) {
    with_canvas(ctx, |canvas| canvas.set_heading(degrees));
}

#[no_mangle]
pub extern "C" fn logo_rt_set_xy(ctx: *mut RtContext<'_>, x: f64, y: f64) {
    with_canvas(ctx, |canvas| canvas.set_xy(x, y));
}

#[no_mangle]
pub extern "C" fn logo_rt_set_pen_down(ctx: *mut RtContext<'_>, down: i8) {
    with_canvas(ctx, |canvas| canvas.set_pen_down(down != 0));
}

#[no_mangle]
pub extern "C" fn logo_rt_set_pen_color(ctx: *mut RtContext<'_>, index: i64) {
    with_canvas(ctx, |canvas| canvas.set_pen_color(color_index(index)));
}

#[no_mangle]
pub extern "C" fn logo_rt_set_background(ctx: *mut RtContext<'_>, index: i64) {
    with_canvas(ctx, |canvas| canvas.set_background(color_index(index)));
}

#[no_mangle]
pub extern "C" fn logo_rt_background(ctx: *mut RtContext<'_>) -> i64 {
    context(ctx).map_or(-1, |ctx| {
        i64::try_from(ctx.interp.canvas().background()).unwrap_or(-1)
    })
}

#[no_mangle]
pub extern "C" fn logo_rt_pen_color(ctx: *mut RtContext<'_>) -> i64 {
    context(ctx).map_or(-1, |ctx| {
        i64::try_from(ctx.interp.canvas().pen_color()).unwrap_or(-1)
    })
}

/// `[red green blue]` percentages of a palette entry.
#[no_mangle]
pub extern "C" fn logo_rt_palette(ctx: *mut RtContext<'_>, index: i64) -> ValueRef {
    let Some(ctx) = context(ctx) else {
        return ValueRef::NULL;
    };
    let entry = usize::try_from(index).ok().and_then(|i| PALETTE.get(i));
    let result = match entry {
        Some(rgb) => {
            let items = rgb.map(|c| Handle::number(f64::from(c)));
            Ok(ctx.interp.constants().list(items))
        }
        None => Err(doesnt_like("palette", &Handle::word(index.to_string()))),
    };
    ctx.register_result(result)
}

#[no_mangle]
pub extern "C" fn logo_rt_label(ctx: *mut RtContext<'_>, ptr: *const u8, len: usize) {
    if let Some(text) = text(ptr, len) {
        with_canvas(ctx, |canvas| canvas.label(text));
    }
}

/// Write the picture as SVG. Nothing, or a file system error value.
#[no_mangle]
pub extern "C" fn logo_rt_save_picture(ctx: *mut RtContext<'_>, path: *const u8, len: usize) -> ValueRef {
    with_text(ctx, path, len, |ctx, path| {
        ctx.interp
            .canvas()
            .save_svg(Path::new(path))
            .map_err(|err| file_system(format_args!("{path}: {err}")))?;
        Ok(ctx.interp.nothing())
    })
}
