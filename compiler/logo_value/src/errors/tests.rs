use super::*;
use crate::value::Constants;
use crate::Control;
use pretty_assertions::assert_eq;

#[test]
fn kinds_map_to_ucb_codes() {
    assert_eq!(ErrorKind::StackOverflow.code(), 2);
    assert_eq!(ErrorKind::ParenNotFound.code(), 10);
    assert_eq!(ErrorKind::NoTag { tag: "x".into() }.code(), 24);
    assert_eq!(
        ErrorKind::Custom {
            message: "m".into()
        }
        .code(),
        35
    );
    assert_eq!(
        ErrorKind::OutsideProcedure {
            procedure: "stop".into()
        }
        .code(),
        31
    );
}

#[test]
fn runtime_errors_travel_under_error_tag() {
    let err = no_value("x");
    let payload = err.as_error().cloned();
    let Some(payload) = payload else {
        panic!("expected an error payload");
    };
    assert_eq!(payload.tag, "ERROR");
    assert_eq!(payload.message, "x has no value");
    assert_eq!(payload.code(), 11);
    assert!(payload.matches_tag("error"));
}

#[test]
fn system_kinds_have_their_own_tags() {
    assert_eq!(ErrorKind::Toplevel.tag(), "TOPLEVEL");
    assert_eq!(ErrorKind::Terminate.tag(), "SYSTEM");
    assert!(ErrorPayload::new(ErrorKind::Terminate).is_system());
    assert!(!ErrorPayload::new(ErrorKind::StackOverflow).is_system());
}

#[test]
fn throw_keeps_tag_and_value() {
    let err = throw("Done", Some(Handle::word("v")));
    let Some(payload) = err.as_error() else {
        panic!("expected an error payload");
    };
    assert!(payload.matches_tag("DONE"));
    assert_eq!(payload.value.as_ref().map(Handle::to_string), Some("v".to_string()));
}

#[test]
fn doesnt_like_shows_brackets() {
    let constants = Constants::new();
    let err = doesnt_like("butfirst", &constants.empty_list());
    let Some(payload) = err.as_error() else {
        panic!("expected an error payload");
    };
    assert_eq!(payload.message, "butfirst doesn't like [] as input");
}

#[test]
fn context_is_filled_once() {
    let line = Handle::word("first");
    let payload = ErrorPayload::new(ErrorKind::StackOverflow)
        .with_context(Some("inner"), Some(&line))
        .with_context(Some("outer"), None);
    assert_eq!(payload.procedure.as_deref(), Some("inner"));
    assert!(payload.has_context());
}

#[test]
fn unwind_exposes_control() {
    let ret = Unwind::ret(Handle::number(3.0));
    assert!(matches!(ret.control(), Control::Return(_)));
    assert!(ret.as_error().is_none());
    assert!(Unwind::from_handle(Handle::word("x")).is_none());
    assert!(Unwind::from_handle(ret.into_handle()).is_some());
}
