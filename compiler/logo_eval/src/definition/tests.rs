use super::*;
use pretty_assertions::assert_eq;

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn define(text: &str) -> Result<Procedure, Unwind> {
    from_source(&Constants::new(), &lines(text))
}

fn code(result: Result<Procedure, Unwind>) -> Option<i32> {
    result.err().and_then(|e| e.as_error().map(|p| p.code()))
}

#[test]
fn header_with_every_kind_of_input() {
    let Ok(procedure) = define("to Shape :size [:sides 4] [:rest]\nprint :size\nend") else {
        panic!("definition failed");
    };
    assert_eq!(procedure.name, "shape");
    assert_eq!(procedure.required, vec!["size".to_string()]);
    assert_eq!(procedure.optional.len(), 1);
    assert_eq!(procedure.optional[0].name, "sides");
    assert_eq!(procedure.optional[0].default.show(), "[4]");
    assert_eq!(procedure.rest.as_deref(), Some("rest"));
    assert_eq!(procedure.arity.triple(), (1, 1, -1));
    assert!(!procedure.is_macro);
}

#[test]
fn trailing_number_sets_default_arity() {
    let Ok(procedure) = define("to f :a [:b 1] 2\nend") else {
        panic!("definition failed");
    };
    assert_eq!(procedure.arity.triple(), (1, 2, 2));
}

#[test]
fn macro_keyword_sets_the_flag() {
    let Ok(procedure) = define(".macro m\noutput [print 1]\nend") else {
        panic!("definition failed");
    };
    assert!(procedure.is_macro);
}

#[test]
fn tags_map_to_line_indices() {
    let Ok(procedure) = define("to loop\nprint 1\ntag \"again\nprint 2\ngoto \"again\nend") else {
        panic!("definition failed");
    };
    assert_eq!(procedure.tag("AGAIN"), Some(EntryPoint::Line(1)));
    assert_eq!(procedure.tag("missing"), None);
}

#[test]
fn source_keeps_the_text_as_written() {
    let Ok(procedure) = define("to sq :x\noutput :x * :x\nEND\nignored") else {
        panic!("definition failed");
    };
    assert_eq!(procedure.source, "to sq :x\noutput :x * :x\nend");
}

#[test]
fn malformed_headers_are_rejected() {
    assert_eq!(code(define("to")), Some(6));
    assert_eq!(code(define("to 3")), Some(7));
    assert_eq!(code(define("to f [:a 1] :b")), Some(7));
    assert_eq!(code(define("to f :a 5")), Some(7));
    assert_eq!(code(define("to f\ntag \"x\ntag \"x\nend")), Some(7));
}

#[test]
fn definition_line_detection() {
    let c = Constants::new();
    let read = |text: &str| read_line(&c, text).unwrap_or_else(|_| c.empty_list());
    assert!(is_definition_start(&read("TO foo")));
    assert!(is_definition_start(&read(".macro foo")));
    assert!(!is_definition_start(&read("print 1")));
    assert!(is_end_line(&read(" End ")));
    assert!(!is_end_line(&read("end 1")));
}

#[test]
fn list_form_round_trips_through_text() {
    let c = Constants::new();
    let Ok(text) = read_line(&c, "[a [b 2]] [print :a] [print :b]") else {
        panic!("read failed");
    };
    let name = Handle::word("Pair");
    let Ok(procedure) = from_list(&c, &name, &text, false) else {
        panic!("define failed");
    };
    assert_eq!(procedure.arity.triple(), (1, 1, 2));
    assert_eq!(
        procedure.source,
        "to pair :a [:b 2]\nprint :a\nprint :b\nend"
    );
    let Ok(listed) = to_list(&c, &procedure) else {
        panic!("text failed");
    };
    assert_eq!(listed.show(), "[[a [b 2]] [print :a] [print :b]]");
}

#[test]
fn list_form_rejects_non_list_lines() {
    let c = Constants::new();
    let Ok(text) = read_line(&c, "[a] word") else {
        panic!("read failed");
    };
    let result = from_list(&c, &Handle::word("f"), &text, false);
    assert_eq!(code(result), Some(7));
}
