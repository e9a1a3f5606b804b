use mocksmith::{mock, MockHandle, Shape, TypeTag, Value};
use proptest::prelude::*;

/// Scalar values of the widths the `Registry` shape accepts.
pub fn key() -> impl Strategy<Value = i64> {
    -1_000i64..1_000
}

pub fn text() -> impl Strategy<Value = String> {
    "[a-z]{0,8}"
}

/// Arbitrary values, nested up to three levels.
pub fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        Just(Value::Unit),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::I32),
        any::<i64>().prop_map(Value::I64),
        any::<u8>().prop_map(Value::U8),
        any::<f64>().prop_map(Value::F64),
        "\\PC{0,12}".prop_map(Value::Str),
    ];

    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Seq),
            prop::option::of(inner).prop_map(|v| Value::Optional(v.map(Box::new))),
        ]
    })
}

/// `Registry.lookup(i64) -> String`, `Registry.store(i64, Any) -> Any`.
pub fn registry() -> MockHandle {
    let shape = Shape::interface("Registry")
        .method("lookup", [TypeTag::I64], TypeTag::Str)
        .method("store", [TypeTag::I64, TypeTag::Any], TypeTag::Any)
        .build()
        .expect("valid shape");
    mock(shape).expect("interface is mockable")
}
