use pretty_assertions::assert_eq;

use super::*;
use crate::console::BufferConsole;
use crate::interpreter::InterpreterBuilder;

fn interpreter() -> (Interpreter, std::sync::Arc<parking_lot::Mutex<String>>) {
    let console = BufferConsole::new();
    let output = console.output_handle();
    let interp = InterpreterBuilder::new().console(console).build();
    (interp, output)
}

#[test]
fn prompts_follow_the_reader_state() {
    let (mut interp, _) = interpreter();
    let mut toplevel = Toplevel::new(true);
    assert_eq!(toplevel.prompt(), "? ");
    toplevel.feed(&mut interp, "to f");
    assert_eq!(toplevel.prompt(), "> ");
    toplevel.feed(&mut interp, "end");
    assert_eq!(toplevel.prompt(), "? ");
    toplevel.feed(&mut interp, "print [a");
    assert_eq!(toplevel.prompt(), "~ ");
    toplevel.feed(&mut interp, "b]");
    assert_eq!(toplevel.prompt(), "? ");
}

#[test]
fn continuation_lines_are_joined() {
    let (mut interp, output) = interpreter();
    let mut toplevel = Toplevel::new(false);
    assert_eq!(toplevel.feed(&mut interp, "print [a"), Outcome::Continue);
    assert_eq!(toplevel.feed(&mut interp, "b]"), Outcome::Continue);
    assert_eq!(*output.lock(), "a b\n");
}

#[test]
fn quiet_definitions_are_not_acknowledged() {
    let (mut interp, output) = interpreter();
    let mut toplevel = Toplevel::new(true);
    toplevel.feed(&mut interp, "to f");
    toplevel.feed(&mut interp, "output 1");
    toplevel.feed(&mut interp, "end");
    toplevel.feed(&mut interp, "print f");
    assert_eq!(*output.lock(), "1\n");
}

#[test]
fn a_bad_header_is_reported_immediately() {
    let (mut interp, output) = interpreter();
    let mut toplevel = Toplevel::new(false);
    toplevel.feed(&mut interp, "to");
    assert_eq!(toplevel.prompt(), "? ");
    assert!(!output.lock().is_empty());
}

#[test]
fn end_of_input_defines_an_unfinished_procedure() {
    let (mut interp, _) = interpreter();
    let mut toplevel = Toplevel::new(true);
    toplevel.feed(&mut interp, "to f");
    toplevel.feed(&mut interp, "output 2");
    assert_eq!(toplevel.finish(&mut interp), Outcome::Exit(0));
    assert!(interp.registry().is_defined("f"));
}

#[test]
fn bye_exits() {
    let (mut interp, _) = interpreter();
    let mut toplevel = Toplevel::new(false);
    assert_eq!(toplevel.feed(&mut interp, "bye"), Outcome::Exit(0));
}

#[test]
fn load_source_defines_and_runs() {
    let (mut interp, output) = interpreter();
    let source = "to double :n\noutput :n * 2\nend\n\nmake \"x double 21\nprint :x\n";
    assert!(load_source(&mut interp, source).is_ok());
    assert_eq!(*output.lock(), "42\n");
}

#[test]
fn load_source_stops_at_the_first_error() {
    let (mut interp, output) = interpreter();
    let source = "print 1\nprint :missing\nprint 2\n";
    let Err(unwind) = load_source(&mut interp, source) else {
        panic!("load did not fail");
    };
    assert_eq!(unwind.as_error().map(|e| e.code()), Some(11));
    assert_eq!(*output.lock(), "1\n");
}

#[test]
fn errors_reset_the_frame_stack() {
    let (mut interp, _) = interpreter();
    let mut toplevel = Toplevel::new(true);
    toplevel.feed(&mut interp, "to f");
    toplevel.feed(&mut interp, "g");
    toplevel.feed(&mut interp, "end");
    toplevel.feed(&mut interp, "f");
    assert!(!interp.frames().in_procedure());
}
