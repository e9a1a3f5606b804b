//! End-to-end stubbing through the public API: shapes, factories, stubs
//! and defaults.

use mocksmith::{
    args, mock, mock_with, reset, when, Failure, MockError, MockFactory, MockHandle,
    MockSettings, Outcome, ProxyKind, Shape, TypeTag, Value,
};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct RuntimeError(&'static str);

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for RuntimeError {}

fn user_service() -> Shape {
    Shape::interface("UserService")
        .method("find_by_id", [TypeTag::I64], TypeTag::optional(TypeTag::Str))
        .method("save", [TypeTag::Str], TypeTag::Bool)
        .method("count", [], TypeTag::U32)
        .method("names", [], TypeTag::seq(TypeTag::Str))
        .method("touch", [TypeTag::I64], TypeTag::Unit)
        .build()
        .expect("valid shape")
}

fn user_mock() -> MockHandle {
    mock(user_service()).expect("interface is mockable")
}

#[test]
fn stubbed_value_and_optional_default() {
    let handle = user_mock();
    when(&handle, "find_by_id", args![1i64])
        .then_return(Some("user1"))
        .unwrap();

    let hit: Option<String> = handle.call("find_by_id", args![1i64]).unwrap();
    let miss: Option<String> = handle.call("find_by_id", args![2i64]).unwrap();
    assert_eq!(hit.as_deref(), Some("user1"));
    assert_eq!(miss, None);
}

#[test]
fn defaults_follow_declared_return_types() {
    let handle = user_mock();
    assert!(!handle.call::<bool>("save", args!["x"]).unwrap());
    assert_eq!(handle.call::<u32>("count", args![]).unwrap(), 0);
    assert!(handle.call::<Vec<String>>("names", args![]).unwrap().is_empty());
    handle.call::<()>("touch", args![5i64]).unwrap();
}

#[test]
fn default_outcome_is_marked_unstubbed() {
    let handle = user_mock();
    match handle.invoke("count", args![]).unwrap() {
        Outcome::Default(Value::U32(0)) => {}
        other => panic!("expected default outcome, got {:?}", other),
    }
}

#[test]
fn thrown_failure_keeps_identity() {
    let handle = user_mock();
    let failure: Failure = Arc::new(RuntimeError("boom"));
    when(&handle, "save", args!["user1"])
        .then_throw_shared(Arc::clone(&failure))
        .unwrap();

    for _ in 0..2 {
        let err = handle.call::<bool>("save", args!["user1"]).unwrap_err();
        let raised = err.failure().expect("stubbed failure");
        assert!(Arc::ptr_eq(raised, &failure));
        assert_eq!(err.to_string(), "boom");
    }
}

#[test]
fn downcast_recovers_user_error() {
    let handle = user_mock();
    when(&handle, "save", args!["user1"])
        .then_throw(RuntimeError("boom"))
        .unwrap();
    let err = handle.call::<bool>("save", args!["user1"]).unwrap_err();
    assert_eq!(err.downcast_failure::<RuntimeError>().map(|e| e.0), Some("boom"));
}

#[test]
fn implementation_sees_arguments() {
    let handle = user_mock();
    when(&handle, "find_by_id", args![7i64])
        .then_implement(|args| Value::from(Some(format!("user{}", args[0]))))
        .unwrap();
    let found: Option<String> = handle.call("find_by_id", args![7i64]).unwrap();
    assert_eq!(found.as_deref(), Some("user7"));
}

#[test]
fn last_write_wins() {
    let handle = user_mock();
    when(&handle, "count", args![]).then_return(1u32).unwrap();
    when(&handle, "count", args![]).then_return(2u32).unwrap();
    assert_eq!(handle.call::<u32>("count", args![]).unwrap(), 2);
}

#[test]
fn identical_configuration_is_idempotent() {
    let handle = user_mock();
    when(&handle, "count", args![]).then_return(4u32).unwrap();
    when(&handle, "count", args![]).then_return(4u32).unwrap();
    assert_eq!(handle.call::<u32>("count", args![]).unwrap(), 4);
    assert_eq!(handle.call::<u32>("count", args![]).unwrap(), 4);
}

#[test]
fn mocks_of_same_shape_are_isolated() {
    let first = user_mock();
    let second = user_mock();
    when(&first, "count", args![]).then_return(9u32).unwrap();

    assert_eq!(first.call::<u32>("count", args![]).unwrap(), 9);
    assert_eq!(second.call::<u32>("count", args![]).unwrap(), 0);
    assert_eq!(second.recorded_calls().unwrap().len(), 1);
}

#[test]
fn reset_restores_defaults_for_one_mock() {
    let first = user_mock();
    let second = user_mock();
    when(&first, "count", args![]).then_return(3u32).unwrap();
    when(&second, "count", args![]).then_return(5u32).unwrap();

    reset(&first).unwrap();
    assert_eq!(first.call::<u32>("count", args![]).unwrap(), 0);
    assert_eq!(second.call::<u32>("count", args![]).unwrap(), 5);
}

#[test]
fn unknown_member_and_bad_arguments_are_misuse() {
    let handle = user_mock();
    assert!(matches!(
        when(&handle, "delete", args![1i64]).then_return(true),
        Err(MockError::Misuse(_))
    ));
    assert!(matches!(
        when(&handle, "find_by_id", args![1i32]).then_return(None::<String>),
        Err(MockError::Misuse(_))
    ));
    assert!(matches!(
        when(&handle, "count", args![]).then_return("three"),
        Err(MockError::Misuse(_))
    ));
    assert!(matches!(
        handle.invoke("save", args![]),
        Err(MockError::Misuse(_))
    ));
}

#[test]
fn class_without_hooks_is_unsupported() {
    let shape = Shape::class("Clock")
        .final_method("now", [], TypeTag::I64)
        .static_method("system", [], TypeTag::record("Clock"))
        .build()
        .unwrap();
    let err = mock(shape.clone()).unwrap_err();
    assert!(matches!(err, MockError::UnsupportedShape(_)));

    let handle = mock_with(shape, MockSettings::new().mock_static_methods()).unwrap();
    assert_eq!(handle.proxy_kind(), ProxyKind::Plain);
}

#[test]
fn final_methods_need_the_switch() {
    let shape = Shape::class("Clock")
        .final_method("now", [], TypeTag::I64)
        .build()
        .unwrap();
    let handle = mock_with(shape, MockSettings::new().mock_final_methods()).unwrap();
    assert_eq!(handle.proxy_kind(), ProxyKind::Dispatch);
    when(&handle, "now", args![]).then_return(1_700_000_000i64).unwrap();
    assert_eq!(handle.call::<i64>("now", args![]).unwrap(), 1_700_000_000);
}

#[test]
fn released_mock_rejects_calls() {
    let factory = MockFactory::new();
    let handle = factory.create_mock(user_service()).unwrap();
    assert!(factory.release(&handle));
    assert!(matches!(
        handle.invoke("count", args![]),
        Err(MockError::Misuse(_))
    ));
}

#[test]
fn named_mock_reports_its_name() {
    let handle = mock_with(user_service(), MockSettings::new().name("users")).unwrap();
    assert_eq!(handle.name(), "users");
    assert_eq!(handle.to_string(), "users");
}
