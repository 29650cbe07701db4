use pretty_assertions::assert_eq;

use logo_eval::{run_session, BufferConsole, Interpreter, InterpreterBuilder};

use super::*;

fn text(ctx: *mut RtContext<'_>, s: &str) -> ValueRef {
    logo_rt_word(ctx, s.as_ptr(), s.len())
}

fn lookup(ctx: *mut RtContext<'_>, name: &str) -> ValueRef {
    logo_rt_lookup(ctx, name.as_ptr(), name.len())
}

fn session(install: impl FnOnce(&mut Interpreter), lines: &[&str]) -> String {
    let console = BufferConsole::with_input(lines);
    let output = console.output_handle();
    let mut interp = InterpreterBuilder::new().console(console).build();
    install(&mut interp);
    run_session(&mut interp);
    let text = output.lock().clone();
    text
}

fn install(interp: &mut Interpreter, source: &str, main: NativeEntryFn) {
    if let Err(unwind) = define_native(interp, source, main, &[]) {
        panic!("could not install {source:?}: {:?}", unwind.control().short_name());
    }
}

// Compiled bodies

extern "C" fn square(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let x = lookup(ctx, "x");
    if logo_rt_is_control(ctx, x) == 1 {
        return x;
    }
    if logo_rt_is_number(ctx, x) == 0 {
        let who = "square";
        return logo_rt_error_doesnt_like(ctx, who.as_ptr(), who.len(), x);
    }
    let n = logo_rt_number(ctx, x);
    let result = logo_rt_make_number(ctx, n * n);
    logo_rt_return(ctx, result)
}

extern "C" fn one_two_three(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let items = [
        logo_rt_make_number(ctx, 1.0),
        logo_rt_make_number(ctx, 2.0),
        logo_rt_make_number(ctx, 3.0),
    ];
    let list = logo_rt_list(ctx, items.as_ptr(), items.len());
    logo_rt_print_value(ctx, list);
    let tail = logo_rt_butfirst(ctx, list);
    logo_rt_print_value(ctx, tail);
    logo_rt_stop(ctx)
}

extern "C" fn caught(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let tag = "oops";
    logo_rt_begin_catch(ctx, tag.as_ptr(), tag.len());
    let value = text(ctx, "caught");
    let thrown = logo_rt_throw(ctx, tag.as_ptr(), tag.len(), value);
    let result = logo_rt_end_catch(ctx, thrown, tag.as_ptr(), tag.len());
    logo_rt_return(ctx, result)
}

extern "C" fn hop(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let a = text(ctx, "a");
    logo_rt_print_value(ctx, a);
    let tag = "again";
    logo_rt_goto(ctx, tag.as_ptr(), tag.len())
}

extern "C" fn hop_again(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let b = text(ctx, "b");
    logo_rt_print_value(ctx, b);
    logo_rt_stop(ctx)
}

extern "C" fn add_up(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let items = [logo_rt_make_number(ctx, 2.0), logo_rt_make_number(ctx, 3.0)];
    let args = logo_rt_list(ctx, items.as_ptr(), items.len());
    let name = "sum";
    let total = logo_rt_call(ctx, name.as_ptr(), name.len(), args);
    if logo_rt_is_control(ctx, total) == 1 {
        return total;
    }
    logo_rt_return(ctx, total)
}

extern "C" fn tail_square(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let target = text(ctx, "square");
    let items = [logo_rt_make_number(ctx, 6.0)];
    let args = logo_rt_list(ctx, items.as_ptr(), items.len());
    logo_rt_continuation(ctx, target, args)
}

extern "C" fn tested(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let before = logo_rt_test_result(ctx);
    logo_rt_set_test(ctx, 1);
    let after = logo_rt_test_result(ctx);
    let result = logo_rt_make_number(ctx, f64::from(before * 10 + after));
    logo_rt_return(ctx, result)
}

extern "C" fn first_of_empty(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let empty = logo_rt_empty_list(ctx);
    logo_rt_first(ctx, empty)
}

extern "C" fn pins(ctx: *mut RtContext<'_>, _args: ValueRef) -> ValueRef {
    let value = text(ctx, "kept");
    let refused = logo_rt_release(ctx, value);
    let retained = logo_rt_retain(ctx, value);
    let released = logo_rt_release(ctx, value);
    let gone = logo_rt_is_nothing(ctx, value) == 0 && logo_rt_count(ctx, value) == -1;
    let code = f64::from(refused) * 100.0 + f64::from(retained) * 10.0 + f64::from(released);
    let result = logo_rt_make_number(ctx, if gone { code } else { -code });
    logo_rt_return(ctx, result)
}

// Entry point tests

#[test]
fn compiled_body_reads_its_inputs() {
    let out = session(
        |interp| install(interp, "to square :x\noutput :x * :x\nend", square),
        &["print square 7", "print square 1.5"],
    );
    assert_eq!(out, "49\n2.25\n");
}

#[test]
fn compiled_errors_carry_the_procedure_name() {
    let out = session(
        |interp| install(interp, "to square :x\noutput :x * :x\nend", square),
        &["print square \"foo"],
    );
    assert_eq!(out, "square doesn't like foo as input in square\n");
}

#[test]
fn builds_and_prints_lists() {
    let out = session(
        |interp| install(interp, "to count3\nprint [1 2 3]\nprint bf [1 2 3]\nend", one_two_three),
        &["count3"],
    );
    assert_eq!(out, "1 2 3\n2 3\n");
}

#[test]
fn throw_inside_a_compiled_catch() {
    let out = session(
        |interp| install(interp, "to caught\noutput catch \"oops [throw \"oops \"caught]\nend", caught),
        &["print caught"],
    );
    assert_eq!(out, "caught\n");
}

#[test]
fn goto_enters_the_tag_entry() {
    let out = session(
        |interp| {
            let source = "to hop\nprint \"a\ngo \"again\ntag \"again\nprint \"b\nend";
            if define_native(interp, source, hop, &[("again", hop_again)]).is_err() {
                panic!("could not install hop");
            }
        },
        &["hop"],
    );
    assert_eq!(out, "a\nb\n");
}

#[test]
fn calls_back_into_the_interpreter() {
    let out = session(
        |interp| install(interp, "to add.up\noutput sum 2 3\nend", add_up),
        &["print add.up"],
    );
    assert_eq!(out, "5\n");
}

#[test]
fn continuation_runs_the_target() {
    let out = session(
        |interp| {
            install(interp, "to square :x\noutput :x * :x\nend", square);
            install(interp, "to six.squared\noutput square 6\nend", tail_square);
        },
        &["print six.squared"],
    );
    assert_eq!(out, "36\n");
}

#[test]
fn test_state_is_per_frame() {
    let out = session(
        |interp| install(interp, "to tested\ntest \"true\noutput 1\nend", tested),
        &["print tested"],
    );
    // -1 before any TEST, then 1.
    assert_eq!(out, "-9\n");
}

#[test]
fn runtime_errors_come_back_as_values() {
    let out = session(
        |interp| install(interp, "to oops\noutput first []\nend", first_of_empty),
        &["print oops"],
    );
    assert_eq!(out, "first doesn't like [] as input in oops\n");
}

#[test]
fn released_slots_are_freed() {
    let out = session(
        |interp| install(interp, "to pins\noutput 11\nend", pins),
        &["print pins"],
    );
    assert_eq!(out, "11\n");
}

#[test]
fn null_context_yields_failure_values() {
    let ctx: *mut RtContext<'_> = std::ptr::null_mut();
    assert!(logo_rt_number(ctx, ValueRef(1)).is_nan());
    assert_eq!(text(ctx, "x"), ValueRef::NULL);
    assert_eq!(logo_rt_count(ctx, ValueRef(1)), -1);
    assert_eq!(logo_rt_test_result(ctx), -1);
}

#[test]
fn direct_context_round_trip() {
    let mut interp = InterpreterBuilder::new().build();
    let mut ctx = RtContext::new(&mut interp);
    let ptr: *mut RtContext<'_> = &mut ctx;
    let word = text(ptr, "Hello");
    let other = text(ptr, "HELLO");
    assert_eq!(logo_rt_equal(ptr, word, other, 0), 1);
    assert_eq!(logo_rt_equal(ptr, word, other, 1), 0);
    let seven = logo_rt_make_number(ptr, 7.0);
    assert_eq!(logo_rt_number(ptr, seven), 7.0);
    assert_eq!(logo_rt_is_bool(ptr, seven), 0);
    let missing = lookup(ptr, "nowhere");
    assert_eq!(logo_rt_is_control(ptr, missing), 1);
    assert_eq!(logo_rt_error_code(ptr, missing), 11);
    assert_eq!(ctx.table().len(), 4);
}

// Handle table

#[test]
fn table_never_hands_out_null() {
    let mut table = HandleTable::new();
    assert!(table.is_empty());
    let first = table.register(Handle::word("a"));
    assert_eq!(first, ValueRef(1));
    assert!(table.get(ValueRef::NULL).is_none());
    assert!(!table.retain(ValueRef::NULL));
}

#[test]
fn table_reuses_released_slots() {
    let mut table = HandleTable::new();
    let a = table.register(Handle::word("a"));
    let _b = table.register(Handle::word("b"));
    assert!(table.retain(a));
    assert!(table.retain(a));
    assert!(table.release(a));
    assert!(table.get(a).is_some());
    assert!(table.release(a));
    assert!(table.get(a).is_none());
    assert!(!table.release(a));
    let c = table.register(Handle::word("c"));
    assert_eq!(c, a);
    assert_eq!(table.len(), 2);
}
