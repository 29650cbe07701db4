use std::path::PathBuf;

use pretty_assertions::assert_eq;

use crate::canvas::{DrawCommand, RecordingCanvas};
use crate::console::BufferConsole;
use crate::interpreter::InterpreterBuilder;
use crate::toplevel::run_session;

fn run(lines: &[&str]) -> String {
    let console = BufferConsole::with_input(lines);
    let output = console.output_handle();
    let mut interp = InterpreterBuilder::new().console(console).build();
    run_session(&mut interp);
    let text = output.lock().clone();
    text
}

fn run_drawing(lines: &[&str]) -> (String, Vec<DrawCommand>) {
    let console = BufferConsole::with_input(lines);
    let output = console.output_handle();
    let canvas = RecordingCanvas::new();
    let mut interp = InterpreterBuilder::new()
        .console(console)
        .canvas(canvas.clone())
        .build();
    run_session(&mut interp);
    let text = output.lock().clone();
    (text, canvas.commands())
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("logo-{}-{name}", std::process::id()))
}

// Words and lists

#[test]
fn list_construction() {
    let out = run(&[
        "show fput 1 [2 3]",
        "show lput 4 [1 2 3]",
        "show (list 1 [2] 3)",
        "show se [a b] \"c",
        "print word \"ab \"cd",
    ]);
    assert_eq!(out, "[1 2 3]\n[1 2 3 4]\n[1 [2] 3]\n[a b c]\nabcd\n");
}

#[test]
fn selectors_on_words_and_lists() {
    let out = run(&[
        "print first \"hello",
        "print butfirst \"hello",
        "print last [a b c]",
        "show butlast [1 2 3]",
        "print item 2 [a b c]",
        "print count [a [b c] d]",
    ]);
    assert_eq!(out, "h\nello\nc\n[1 2]\nb\n3\n");
}

#[test]
fn first_of_an_empty_list_is_an_error() {
    assert_eq!(run(&["print first []"]), "first doesn't like [] as input\n");
}

#[test]
fn arrays_honor_their_origin() {
    let out = run(&[
        "make \"a (array 3 0)",
        "setitem 0 :a \"x",
        "print item 0 :a",
        "print arrayp :a",
    ]);
    assert_eq!(out, "x\ntrue\n");
}

#[test]
fn cyclic_lists_count_and_print_finitely() {
    let out = run(&[
        "make \"l [1 2]",
        ".setbf butfirst :l :l",
        "print count :l",
        "show :l",
    ]);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("2"));
    assert!(lines.next().is_some_and(|line| line.contains("...")), "{out}");
}

#[test]
fn predicates() {
    let out = run(&[
        "print memberp \"b [a b c]",
        "show member \"b [a b c]",
        "print equalp \"ABC \"abc",
        "print numberp \"12",
        "print wordp [a]",
        "print listp []",
        "print emptyp \"",
    ]);
    assert_eq!(out, "true\n[b c]\ntrue\ntrue\nfalse\ntrue\ntrue\n");
}

#[test]
fn case_sensitive_comparison_through_caseignoredp() {
    let out = run(&["make \"caseignoredp \"false", "print equalp \"ABC \"abc"]);
    assert_eq!(out, "false\n");
}

#[test]
fn characters() {
    let out = run(&["print ascii \"A", "print char 97", "print uppercase \"mixed"]);
    assert_eq!(out, "65\na\nMIXED\n");
}

// Arithmetic and logic

#[test]
fn arithmetic() {
    let out = run(&[
        "print quotient 7 2",
        "print (quotient 4)",
        "print remainder -7 3",
        "print int 3.7",
        "print round 2.5",
        "print sqrt 16",
        "print power 2 10",
        "print abs -3",
        "print (sum 1 2 3 4)",
    ]);
    assert_eq!(out, "3.5\n0.25\n-1\n3\n3\n4\n1024\n3\n10\n");
}

#[test]
fn division_by_zero_is_rejected() {
    assert_eq!(run(&["print quotient 1 0"]), "quotient doesn't like 0 as input\n");
}

#[test]
fn non_numeric_inputs_are_rejected() {
    assert_eq!(run(&["print sum 1 \"x"]), "sum doesn't like x as input\n");
}

#[test]
fn logic() {
    let out = run(&[
        "print and \"true \"false",
        "print (or \"false \"false \"true)",
        "print not 1 > 2",
    ]);
    assert_eq!(out, "false\ntrue\ntrue\n");
}

// Variables

#[test]
fn make_name_and_thing() {
    let out = run(&["name 5 \"v", "print :v", "print thing \"v", "ern \"v", "print namep \"v"]);
    assert_eq!(out, "5\n5\nfalse\n");
}

#[test]
fn global_from_inside_a_procedure() {
    let out = run(&[
        "to setup",
        "localmake \"tmp 1",
        "global \"g",
        "make \"g :tmp + 1",
        "end",
        "setup",
        "print :g",
        "print namep \"tmp",
    ]);
    assert_eq!(out, "setup defined\n2\nfalse\n");
}

#[test]
fn names_lists_visible_variables() {
    assert_eq!(run(&["make \"zz 1", "show names"]), "[[] [zz]]\n");
}

// Control

#[test]
fn conditionals() {
    let out = run(&[
        "print ifelse 1 > 2 [\"yes] [\"no]",
        "if 2 > 1 [print \"taken]",
        "(if \"false [print 1] [print 2])",
    ]);
    assert_eq!(out, "no\ntaken\n2\n");
}

#[test]
fn run_apply_and_invoke() {
    let out = run(&[
        "print run [sum 1 2]",
        "print apply \"sum [1 2]",
        "print (invoke \"sum 1 2)",
    ]);
    assert_eq!(out, "3\n3\n3\n");
}

#[test]
fn repeat_and_repcount() {
    let out = run(&["repeat 3 [type repcount]", "print []", "print repcount"]);
    assert_eq!(out, "123\n-1\n");
}

#[test]
fn test_and_iftrue() {
    let out = run(&[
        "iftrue [print 1]",
        "test 1 = 1",
        "iftrue [print \"yes]",
        "iffalse [print \"no]",
    ]);
    assert_eq!(out, "iftrue without TEST\nyes\n");
}

#[test]
fn output_and_stop_need_a_procedure() {
    let out = run(&["output 3", "stop"]);
    assert_eq!(
        out,
        "Can only use output inside a procedure\nCan only use stop inside a procedure\n"
    );
}

#[test]
fn catch_outputs_the_thrown_value() {
    let out = run(&["print catch \"t [(throw \"t 5)]", "show error"]);
    assert_eq!(out, "5\n[]\n");
}

#[test]
fn catch_passes_other_tags_through() {
    let out = run(&["print catch \"a [catch \"b [(throw \"a 7)]]"]);
    assert_eq!(out, "7\n");
}

#[test]
fn throw_without_a_catch() {
    assert_eq!(run(&["throw \"nope"]), "Can't find catch tag for nope\n");
}

#[test]
fn catch_error_records_the_error() {
    let out = run(&[
        "catch \"error [make \"x :zz]",
        "print first error",
        "show error",
        "catch \"error [(throw \"error \"oops)]",
        "print item 2 error",
    ]);
    assert_eq!(out, "11\n[]\noops\n");
}

#[test]
fn throw_error_reports_a_custom_message() {
    assert_eq!(run(&["(throw \"error [custom message])"]), "custom message\n");
}

#[test]
fn unmatched_throw_is_caught_by_catch_error() {
    let out = run(&["catch \"error [throw \"elsewhere]", "print first error"]);
    assert_eq!(out, "14\n");
}

#[test]
fn to_inside_an_instruction_list() {
    assert_eq!(run(&["run [to foo]"]), "can't use TO inside a procedure\n");
}

#[test]
fn continue_outside_pause() {
    assert_eq!(run(&["continue"]), "Can only use continue inside a procedure\n");
}

// Workspace

#[test]
fn text_and_po() {
    let out = run(&[
        "to sq :x",
        "output :x * :x",
        "end",
        "show text \"sq",
        "po \"sq",
    ]);
    assert_eq!(
        out,
        "sq defined\n[[x] [output :x * :x]]\nto sq :x\noutput :x * :x\nend\n"
    );
}

#[test]
fn define_builds_a_procedure_from_lists() {
    let out = run(&["define \"dbl [[n] [output :n * 2]]", "print dbl 4"]);
    assert_eq!(out, "8\n");
}

#[test]
fn text_of_primitives_and_unknown_names() {
    let out = run(&["show text \"print", "show text \"nosuch"]);
    assert_eq!(
        out,
        "text doesn't like print as input\nI don't know how to nosuch\n"
    );
}

#[test]
fn erase_and_definedp() {
    let out = run(&[
        "to f",
        "end",
        "print definedp \"f",
        "erase \"f",
        "print definedp \"f",
        "erase \"print",
        "print primitivep \"print",
        "print procedurep \"print",
    ]);
    assert_eq!(
        out,
        "f defined\ntrue\nfalse\nerase doesn't like print as input\ntrue\ntrue\n"
    );
}

#[test]
fn buried_procedures_are_hidden() {
    let out = run(&[
        "to f",
        "end",
        "show procedures",
        "bury \"f",
        "show procedures",
        "print buriedp \"f",
        "unbury \"f",
        "show procedures",
    ]);
    assert_eq!(out, "f defined\n[f]\n[]\ntrue\n[f]\n");
}

#[test]
fn erall_keeps_the_library() {
    let out = run(&[
        "to f",
        "end",
        "make \"v 1",
        "erall",
        "show procedures",
        "print namep \"v",
        "show reverse [1 2]",
    ]);
    assert_eq!(out, "f defined\n[]\nfalse\n[2 1]\n");
}

#[test]
fn save_then_load_restores_procedures() {
    let path = scratch_file("save.lg");
    let save = format!("save \"{}", path.display());
    let load = format!("load \"{}", path.display());
    let out = run(&[
        "to sq :x",
        "output :x * :x",
        "end",
        &save,
        "erall",
        "print definedp \"sq",
        &load,
        "print sq 3",
    ]);
    let _ = std::fs::remove_file(&path);
    assert_eq!(out, "sq defined\nfalse\n9\n");
}

#[test]
fn load_of_a_missing_file_is_a_file_system_error() {
    let path = scratch_file("missing.lg");
    let out = run(&[&format!("load \"{}", path.display())]);
    assert!(out.starts_with("File system error: "), "{out}");
}

#[test]
fn help_text() {
    let out = run(&["help \"forward", "help \"nonesuch"]);
    assert!(out.starts_with("FORWARD dist\n"), "{out}");
    assert!(out.ends_with("No help available on NONESUCH.\n"), "{out}");
}

#[test]
fn help_without_a_name() {
    let out = run(&["help"]);
    assert!(out.starts_with("Type HELP followed by a procedure name."), "{out}");
}

#[test]
fn wait_refuses_an_unrepresentable_delay() {
    let out = run(&["wait 1e300", "print \"next"]);
    assert!(out.starts_with("wait doesn't like "), "{out}");
    assert!(out.ends_with("next\n"), "{out}");
}

#[test]
fn array_size_is_bounded() {
    let out = run(&["make \"a array 1e15", "print count array 3"]);
    assert!(out.starts_with("array doesn't like "), "{out}");
    assert!(out.ends_with("3\n"), "{out}");
}

#[test]
fn library_loops() {
    let out = run(&[
        "make \"i 0",
        "while [:i < 3] [make \"i :i + 1]",
        "print :i",
        "until [:i = 0] [make \"i :i - 1]",
        "print :i",
    ]);
    assert_eq!(out, "3\n0\n");
}

// Console

#[test]
fn print_type_and_show() {
    let out = run(&["type \"a type \"b print \"c", "print [a [b]]", "show [a [b]]"]);
    assert_eq!(out, "abc\na [b]\n[a [b]]\n");
}

#[test]
fn reading_from_the_console() {
    let out = run(&[
        "make \"x readlist",
        "hello world",
        "show :x",
        "print readword",
        "abc",
        "print readchar",
        "z",
    ]);
    assert_eq!(out, "[hello world]\nabc\nz\n");
}

#[test]
fn readlist_at_end_of_input_is_the_empty_word() {
    assert_eq!(run(&["show readlist"]), "\n");
}

// Turtle

#[test]
fn turtle_moves_and_reports_its_pose() {
    let (out, commands) = run_drawing(&[
        "fd 100 rt 90 fd 50",
        "show pos",
        "print heading",
        "pu fd 10 pd",
        "lt 90 bk 10",
        "show pos",
    ]);
    assert_eq!(out, "[50 100]\n90\n[60 90]\n");
    let lines = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { .. }))
        .count();
    assert_eq!(lines, 3);
}

#[test]
fn pen_and_background_colors() {
    let (out, commands) = run_drawing(&[
        "setpc 4 print pc",
        "setbg 2 print bg",
        "show palette 1",
        "print palette 20",
    ]);
    assert_eq!(out, "4\n2\n[0 0 100]\npalette doesn't like 20 as input\n");
    assert!(commands.contains(&DrawCommand::Background(2)));
}

#[test]
fn filled_emits_a_polygon() {
    let (_, commands) = run_drawing(&["filled 3 [fd 10 rt 90 fd 10 rt 90 fd 10]"]);
    assert!(
        commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Polygon { color: 3, .. })),
        "{commands:?}"
    );
}

#[test]
fn clearscreen_and_home() {
    let (out, commands) = run_drawing(&["setxy 10 20", "cs", "show pos", "label \"hi"]);
    assert_eq!(out, "[0 0]\n");
    assert!(commands.contains(&DrawCommand::Clear));
    assert!(commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Label { text, .. } if text == "hi")));
}

#[test]
fn savepict_writes_svg() {
    let path = scratch_file("pict.svg");
    let (out, _) = run_drawing(&["fd 10", &format!("savepict \"{}", path.display())]);
    let svg = std::fs::read_to_string(&path).unwrap_or_default();
    let _ = std::fs::remove_file(&path);
    assert_eq!(out, "");
    assert!(svg.starts_with("<svg"), "{svg}");
    assert!(svg.contains("<line"), "{svg}");
}
