use pretty_assertions::assert_eq;

use super::*;
use crate::config::Config;
use crate::console::BufferConsole;
use crate::signals::{signal_channel, Signal};
use crate::toplevel::run_session;

fn session_with(config: Config, lines: &[&str]) -> String {
    let console = BufferConsole::with_input(lines);
    let output = console.output_handle();
    let mut interp = InterpreterBuilder::new()
        .console(console)
        .config(config)
        .build();
    run_session(&mut interp);
    let text = output.lock().clone();
    text
}

fn session(lines: &[&str]) -> String {
    session_with(Config::default(), lines)
}

#[test]
fn infix_precedence() {
    assert_eq!(session(&["print 2 + 3 * 4", "print (2 + 3) * 4"]), "14\n20\n");
}

#[test]
fn unary_minus_and_comparison() {
    assert_eq!(session(&["print -3 + 5", "print 3 < 4"]), "2\ntrue\n");
}

#[test]
fn defines_and_calls_a_procedure() {
    let out = session(&["to square :x", "output :x * :x", "end", "print square 7"]);
    assert_eq!(out, "square defined\n49\n");
}

#[test]
fn recursion_that_is_not_a_tail_call() {
    let out = session(&[
        "to fact :n",
        "if :n = 0 [output 1]",
        "output :n * fact :n - 1",
        "end",
        "print fact 10",
    ]);
    assert_eq!(out, "fact defined\n3628800\n");
}

#[test]
fn tail_calls_do_not_grow_the_frame_stack() {
    let config = Config {
        recursion_limit: 100,
        ..Config::default()
    };
    let out = session_with(
        config,
        &[
            "to countdown :n",
            "if :n = 0 [output \"done]",
            "output countdown :n - 1",
            "end",
            "print countdown 5000",
        ],
    );
    assert_eq!(out, "countdown defined\ndone\n");
}

#[test]
fn recursion_past_the_limit_is_a_stack_overflow() {
    let config = Config {
        recursion_limit: 20,
        ..Config::default()
    };
    let out = session_with(
        config,
        &[
            "to fact :n",
            "if :n = 0 [output 1]",
            "output :n * fact :n - 1",
            "end",
            "print fact 50",
            "print \"next",
        ],
    );
    assert!(out.contains("Stack overflow"), "{out}");
    assert!(out.ends_with("next\n"), "{out}");
}

#[test]
fn variables_are_dynamically_scoped() {
    let out = session(&[
        "to outer",
        "local \"x",
        "make \"x 5",
        "inner",
        "end",
        "to inner",
        "print :x",
        "end",
        "outer",
        "print namep \"x",
    ]);
    assert_eq!(out, "outer defined\ninner defined\n5\nfalse\n");
}

#[test]
fn a_tail_call_still_sees_its_callers_locals() {
    let out = session(&[
        "to foo :y",
        "output :x + :y",
        "end",
        "to bar :x",
        "output foo 1",
        "end",
        "print bar 5",
        "print namep \"x",
    ]);
    assert_eq!(out, "foo defined\nbar defined\n6\nfalse\n");
}

#[test]
fn a_tail_callee_local_shadows_the_callers_binding() {
    let out = session(&[
        "to foo",
        "local \"x",
        "output namep \"x",
        "end",
        "to bar :x",
        "output foo",
        "end",
        "print bar 5",
    ]);
    assert_eq!(out, "foo defined\nbar defined\nfalse\n");
}

#[test]
fn mutating_a_later_cell_of_a_list_forces_a_fresh_parse() {
    let out = session(&[
        "make \"l [print 1]",
        "run :l",
        ".setfirst bf :l 2",
        "show :l",
        "run :l",
    ]);
    assert_eq!(out, "1\n[print 2]\n2\n");
}

#[test]
fn optional_and_rest_inputs() {
    let out = session(&[
        "to greet :a [:b 10]",
        "output :a + :b",
        "end",
        "print greet 1",
        "print (greet 1 2)",
        "to all [:xs]",
        "output :xs",
        "end",
        "show (all 1 2 3)",
    ]);
    assert_eq!(out, "greet defined\n11\n3\nall defined\n[1 2 3]\n");
}

#[test]
fn uncaught_errors_are_reported_and_the_session_continues() {
    let out = session(&["print :nope", "print 1"]);
    assert_eq!(out, "nope has no value\n1\n");
}

#[test]
fn errors_inside_procedures_name_the_procedure_and_line() {
    let out = session(&["to f", "print :y", "end", "f"]);
    assert_eq!(out, "f defined\ny has no value in f\n[print :y]\n");
}

#[test]
fn goto_to_a_missing_tag_fails_when_it_runs() {
    let out = session(&["to g", "print \"before", "goto \"nowhere", "end", "g"]);
    assert!(out.starts_with("g defined\nbefore\n"), "{out}");
    assert!(out.contains("Can't find tag nowhere in g"), "{out}");
}

#[test]
fn goto_reenters_at_the_tag() {
    let out = session(&[
        "to count3",
        "make \"i 0",
        "tag \"top",
        "make \"i :i + 1",
        "if :i < 3 [goto \"top]",
        "print :i",
        "end",
        "count3",
    ]);
    assert_eq!(out, "count3 defined\n3\n");
}

#[test]
fn redefinition_takes_effect_for_callers() {
    let out = session(&[
        "to f",
        "output 1",
        "end",
        "to g",
        "output f",
        "end",
        "print g",
        "to f",
        "output 2",
        "end",
        "print g",
    ]);
    assert_eq!(out, "f defined\ng defined\n1\nf defined\n2\n");
}

#[test]
fn macros_run_their_expansion_in_the_caller() {
    let out = session(&[".macro say :w", "output (list \"print :w)", "end", "say 5"]);
    assert_eq!(out, "say defined\n5\n");
}

#[test]
fn erract_recovers_errors_in_procedures() {
    let out = session(&[
        "make \"erract [print \"recovered]",
        "to f",
        "print :q",
        "end",
        "f",
        "print \"after",
    ]);
    assert_eq!(out, "f defined\nrecovered\nafter\n");
}

#[test]
fn configured_erract_is_installed() {
    let config = Config {
        erract: Some("print \"handled".to_string()),
        ..Config::default()
    };
    let out = session_with(config, &["print :missing"]);
    assert_eq!(out, "handled\n");
}

#[test]
fn pause_resumes_with_the_continue_value() {
    let out = session(&["to p", "print pause", "end", "p", "continue 42", "print \"done"]);
    assert_eq!(out, "p defined\nPausing...\n42\ndone\n");
}

#[test]
fn errors_inside_pause_do_not_end_it() {
    let out = session(&["to p", "print pause", "end", "p", "print :nope", "co 7"]);
    assert_eq!(out, "p defined\nPausing...\nnope has no value\n7\n");
}

#[test]
fn bye_ends_the_session() {
    let console = BufferConsole::with_input(["print 1", "bye", "print 2"]);
    let output = console.output_handle();
    let mut interp = InterpreterBuilder::new().console(console).build();
    assert_eq!(run_session(&mut interp), 0);
    assert_eq!(*output.lock(), "1\n");
}

#[test]
fn a_queued_toplevel_signal_abandons_the_next_line() {
    let (sender, receiver) = signal_channel();
    let console = BufferConsole::with_input(["print 1", "print 2"]);
    let output = console.output_handle();
    let mut interp = InterpreterBuilder::new()
        .console(console)
        .signals(receiver)
        .build();
    let _ = sender.send(Signal::Toplevel);
    run_session(&mut interp);
    assert_eq!(*output.lock(), "2\n");
}

#[test]
fn a_queued_terminate_signal_ends_the_session() {
    let (sender, receiver) = signal_channel();
    let console = BufferConsole::with_input(["print 1", "print 2"]);
    let output = console.output_handle();
    let mut interp = InterpreterBuilder::new()
        .console(console)
        .signals(receiver)
        .build();
    let _ = sender.send(Signal::Terminate);
    assert_eq!(run_session(&mut interp), 0);
    assert_eq!(*output.lock(), "");
}

#[test]
fn call_procedure_runs_primitives_directly() {
    let mut interp = InterpreterBuilder::new().console(BufferConsole::new()).build();
    let args = [Handle::number(2.0), Handle::number(5.0)];
    let Ok(result) = interp.call_procedure("sum", &args) else {
        panic!("sum failed");
    };
    assert_eq!(result.as_number(), Some(7.0));
}

#[test]
fn run_list_in_command_mode_rejects_a_stray_value() {
    let mut interp = InterpreterBuilder::new().console(BufferConsole::new()).build();
    let Ok(list) = crate::reader::read_line(interp.constants(), "sum 1 2") else {
        panic!("read failed");
    };
    let Err(unwind) = interp.run_list(&list, RunMode::Command) else {
        panic!("expected an error");
    };
    assert_eq!(unwind.as_error().map(ErrorPayload::code), Some(9));
    let Ok(value) = interp.run_list(&list, RunMode::Expression) else {
        panic!("expression mode failed");
    };
    assert_eq!(value.as_number(), Some(3.0));
}

#[test]
fn print_limits_follow_logo_variables() {
    let out = session(&["make \"printwidthlimit 2", "print [1 2 3 4]"]);
    assert_eq!(out, "1 2 ...\n");
}
