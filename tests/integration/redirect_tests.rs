//! Constructor, static and private interception through the global
//! override table. Every test owns its owner types so parallel tests never
//! share an override.

use mocksmith::redirect::{
    construct, private_call, resolve_private_call, resolve_static_call, static_call, watch_static,
    when_constructor, when_private, when_private_mock, when_static, GlobalOverrideTable,
};
use mocksmith::verify::{verify_constructor_calls, verify_private_calls, verify_static_calls};
use mocksmith::{
    args, mock, reset, reset_global, reset_global_signature, reset_private, reset_static,
    FromValue, InstanceKey, MockError, MockResult, OwnerType, Record, Redirect, Shape, Signature,
    TypeTag, Value,
};
use std::fmt;

#[derive(Debug)]
struct Offline;

impl fmt::Display for Offline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("network offline")
    }
}

impl std::error::Error for Offline {}

#[test]
fn reset_global_restores_proceed() {
    struct Clock;

    let owner = OwnerType::of::<Clock>();
    when_static::<Clock>("now").then_return(42i64).unwrap();
    assert_eq!(
        resolve_static_call(owner, "now", &[]).unwrap(),
        Redirect::Value(Value::I64(42))
    );

    assert_eq!(reset_global::<Clock>(), 1);
    assert!(resolve_static_call(owner, "now", &[]).unwrap().is_proceed());
}

#[test]
fn proceed_differs_from_every_value() {
    struct Untouched;

    let proceed = resolve_static_call(OwnerType::of::<Untouched>(), "anything", &[]).unwrap();
    assert!(proceed.is_proceed());
    for value in [Value::Null, Value::Unit, Value::Optional(None), Value::Bool(false)] {
        assert_ne!(proceed, Redirect::Value(value));
    }
    assert_eq!(proceed.value(), None);
}

#[test]
fn static_null_override_is_not_proceed() {
    struct Lookup;

    when_static::<Lookup>("find").then_return(Value::Null).unwrap();
    let answer = resolve_static_call(OwnerType::of::<Lookup>(), "find", &args![1i64]).unwrap();
    assert_eq!(answer, Redirect::Value(Value::Null));
    reset_global::<Lookup>();
}

#[test]
fn static_seam_runs_body_only_when_proceeding() {
    struct Random;

    watch_static::<Random>("next");
    let mut ran = 0;
    let real: u32 = static_call::<Random, _, _>("next", args![], || {
        ran += 1;
        17
    })
    .unwrap();
    assert_eq!((real, ran), (17, 1));

    when_static::<Random>("next").then_return(4u32).unwrap();
    let stubbed: u32 = static_call::<Random, _, _>("next", args![], || {
        ran += 1;
        17
    })
    .unwrap();
    assert_eq!((stubbed, ran), (4, 1));

    verify_static_calls::<Random>("next", args![]).times(2).unwrap();
    assert_eq!(reset_static::<Random>("next"), 1);
    assert_eq!(reset_static::<Random>("next"), 0);
}

#[test]
fn static_override_can_raise_and_compute() {
    struct Network;

    when_static::<Network>("ping").then_throw(Offline).unwrap();
    let err = static_call::<Network, bool, _>("ping", args![], || true).unwrap_err();
    assert!(matches!(err, MockError::Stubbed(_)));
    assert_eq!(err.to_string(), "network offline");

    when_static::<Network>("double")
        .then_implement(|args| match args.first() {
            Some(Value::I64(n)) => Value::I64(n * 2),
            _ => Value::I64(0),
        })
        .unwrap();
    let doubled: i64 = static_call::<Network, _, _>("double", args![21i64], || 0).unwrap();
    assert_eq!(doubled, 42);
    assert_eq!(reset_global::<Network>(), 2);
}

#[derive(Debug, Clone, PartialEq)]
struct Connection {
    host: String,
    port: u16,
}

impl Connection {
    fn signature() -> Signature {
        Signature::new([TypeTag::Str, TypeTag::U16])
    }

    fn open(host: &str, port: u16) -> MockResult<Self> {
        construct(&Self::signature(), args![host, port], || Connection {
            host: host.to_string(),
            port,
        })
    }
}

impl From<&Connection> for Value {
    fn from(c: &Connection) -> Self {
        Value::from(
            Record::new("Connection")
                .field("host", &c.host)
                .field("port", c.port),
        )
    }
}

impl FromValue for Connection {
    fn from_value(value: Value) -> MockResult<Self> {
        let mut record = Record::from_value(value)?;
        Ok(Connection {
            host: record.take("host")?,
            port: record.take("port")?,
        })
    }
}

#[test]
fn constructor_override_returns_prebuilt_instance() {
    let fake = Connection {
        host: "fake".into(),
        port: 1,
    };
    when_constructor::<Connection>(Connection::signature())
        .then_return(&fake)
        .unwrap();

    assert_eq!(Connection::open("db.internal", 5432).unwrap(), fake);
    verify_constructor_calls::<Connection>(&Connection::signature(), args!["db.internal", 5432u16])
        .once()
        .unwrap();

    assert_eq!(reset_global_signature::<Connection>(&Connection::signature()), 1);
    let real = Connection::open("db.internal", 5432).unwrap();
    assert_eq!(real.host, "db.internal");
}

#[test]
fn constructor_override_must_produce_an_instance() {
    struct Widget;

    let result = when_constructor::<Widget>(Signature::new([])).then_return(());
    assert!(matches!(result, Err(MockError::Misuse(_))));
}

struct Engine {
    rpm: u32,
}

impl Engine {
    fn health(&self) -> MockResult<String> {
        private_call(self, "diagnose", args![self.rpm], || {
            if self.rpm > 6000 {
                "overheating".to_string()
            } else {
                "ok".to_string()
            }
        })
    }
}

#[test]
fn private_override_targets_one_instance() {
    let patched = Engine { rpm: 1000 };
    let stock = Engine { rpm: 1000 };
    let guard = when_private(&patched, "diagnose").then_return("faulty").unwrap();

    assert_eq!(patched.health().unwrap(), "faulty");
    assert_eq!(stock.health().unwrap(), "ok");
    verify_private_calls(guard.instance(), "diagnose", args![1000u32])
        .once()
        .unwrap();

    assert_eq!(reset_private(InstanceKey::of(&patched)), 1);
    assert_eq!(patched.health().unwrap(), "ok");
    drop(guard);
}

#[test]
fn private_override_ends_when_guard_drops() {
    let engine = Engine { rpm: 7000 };
    {
        let _guard = when_private(&engine, "diagnose").then_return("ok").unwrap();
        assert_eq!(engine.health().unwrap(), "ok");
    }
    assert_eq!(engine.health().unwrap(), "overheating");
    verify_private_calls(InstanceKey::of(&engine), "diagnose", args![7000u32])
        .never()
        .unwrap();
}

#[test]
fn private_override_on_a_mock_identity() {
    let shape = Shape::class("Gateway")
        .private_method("sign", [TypeTag::Str], TypeTag::Str)
        .build()
        .unwrap();
    let handle = mocksmith::mock_with(shape, mocksmith::MockSettings::new().mock_private_methods())
        .unwrap();

    when_private_mock(handle.id(), "sign").then_return("signed").unwrap();
    let answer = resolve_private_call(handle.instance_key(), "sign", &args!["payload"]).unwrap();
    assert_eq!(answer, Redirect::Value(Value::from("signed")));

    reset(&handle).unwrap();
    assert!(!resolve_private_call(handle.instance_key(), "sign", &args!["payload"])
        .unwrap()
        .is_proceed());
    reset_private(handle.id());
}

#[test]
fn mock_reset_leaves_global_overrides_alone() {
    struct Config;

    let shape = Shape::interface("Settings")
        .method("get", [TypeTag::Str], TypeTag::Str)
        .build()
        .unwrap();
    let handle = mock(shape).unwrap();
    when_static::<Config>("load").then_return("cached").unwrap();

    reset(&handle).unwrap();
    assert!(GlobalOverrideTable::global().contains(&mocksmith::redirect::RedirectKey::static_member(
        OwnerType::of::<Config>(),
        "load"
    )));
    reset_global::<Config>();
}
