//! Call-count verification against the invocation ledger.

use mocksmith::{args, mock, reset, verify, when, MockError, MockHandle, Shape, Times, TypeTag};
use std::fmt;

#[derive(Debug)]
struct RuntimeError(&'static str);

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for RuntimeError {}

fn repository() -> MockHandle {
    let shape = Shape::interface("Repository")
        .method("save", [TypeTag::Str], TypeTag::Unit)
        .method("load", [TypeTag::I64], TypeTag::optional(TypeTag::Str))
        .build()
        .unwrap();
    mock(shape).unwrap()
}

#[test]
fn failing_save_is_still_verified_once() {
    let handle = repository();
    when(&handle, "save", args!["user1"])
        .then_throw(RuntimeError("boom"))
        .unwrap();

    let err = handle.call::<()>("save", args!["user1"]).unwrap_err();
    assert_eq!(err.to_string(), "boom");
    verify(&handle).method("save", args!["user1"]).once().unwrap();
}

#[test]
fn counts_are_exact() {
    let handle = repository();
    for _ in 0..3 {
        handle.call::<()>("save", args!["a"]).unwrap();
    }

    let err = verify(&handle).method("save", args!["a"]).times(2).unwrap_err();
    match err {
        MockError::Verification {
            selector,
            expected,
            actual,
            ..
        } => {
            assert!(selector.ends_with("save(\"a\")"), "selector was {}", selector);
            assert_eq!(expected, "2 time(s)");
            assert_eq!(actual, 3);
        }
        other => panic!("unexpected error {:?}", other),
    }
    verify(&handle).method("save", args!["a"]).times(3).unwrap();
    verify(&handle).method("save", args!["a"]).at_least_once().unwrap();
    verify(&handle)
        .method("save", args!["a"])
        .expect(Times::AtLeastOnce)
        .unwrap();
}

#[test]
fn failure_message_lists_recorded_calls() {
    let handle = repository();
    handle.call::<()>("save", args!["b"]).unwrap();

    let message = verify(&handle)
        .method("save", args!["a"])
        .once()
        .unwrap_err()
        .to_string();
    assert!(message.contains("expected exactly once"), "{}", message);
    assert!(message.contains("invoked 0 time(s)"), "{}", message);
    assert!(message.contains("save(\"b\")"), "{}", message);
}

#[test]
fn arguments_distinguish_calls() {
    let handle = repository();
    handle.call::<Option<String>>("load", args![1i64]).unwrap();
    handle.call::<Option<String>>("load", args![2i64]).unwrap();
    handle.call::<Option<String>>("load", args![2i64]).unwrap();

    verify(&handle).method("load", args![1i64]).once().unwrap();
    verify(&handle).method("load", args![2i64]).times(2).unwrap();
    verify(&handle).method("load", args![3i64]).never().unwrap();
}

#[test]
fn reset_clears_the_ledger() {
    let handle = repository();
    handle.call::<()>("save", args!["a"]).unwrap();
    reset(&handle).unwrap();

    verify(&handle).method("save", args!["a"]).never().unwrap();
    verify(&handle).no_interactions().unwrap();
}

#[test]
fn no_interactions_fails_after_a_call() {
    let handle = repository();
    verify(&handle).no_interactions().unwrap();
    handle.call::<()>("save", args!["a"]).unwrap();
    assert!(matches!(
        verify(&handle).no_interactions(),
        Err(MockError::Verification { actual: 1, .. })
    ));
}

#[test]
fn verifying_an_undeclared_member_is_misuse() {
    let handle = repository();
    assert!(matches!(
        verify(&handle).method("remove", args![1i64]).never(),
        Err(MockError::Misuse(_))
    ));
    assert!(matches!(
        verify(&handle).method("load", args!["1"]).never(),
        Err(MockError::Misuse(_))
    ));
}
