//! Stub tables written as JSON.
//!
//! A stub file maps member names to a list of cases:
//!
//! ```json
//! {
//!   "find_by_id": [
//!     { "args": [1], "returns": { "id": 1, "name": "John" } },
//!     { "args": [2], "throws": "database offline" }
//!   ]
//! }
//! ```
//!
//! JSON has fewer types than the mock's declared members, so every value is
//! conformed to the declared parameter or return type before it is stored:
//! integers are narrowed to the declared width, objects take the declared
//! record name and non-null values in optional slots are wrapped in `Some`.

use crate::TestkitError;
use mocksmith::{Behavior, Record, Shape, TypeTag, Value};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Failure raised by a `"throws"` case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ScriptedFailure(pub String);

#[derive(Debug, Clone, Deserialize)]
struct StubCase {
    #[serde(default)]
    args: Vec<serde_json::Value>,
    #[serde(default)]
    returns: Option<serde_json::Value>,
    #[serde(default)]
    throws: Option<String>,
}

/// One stub ready to be configured on a mock.
#[derive(Debug, Clone)]
pub struct StubEntry {
    pub member: String,
    pub args: Vec<Value>,
    pub behavior: Behavior,
}

/// Parse a stub document against `shape`.
pub fn stubs_from_json(shape: &Shape, json: &serde_json::Value) -> Result<Vec<StubEntry>, TestkitError> {
    let cases: BTreeMap<String, Vec<StubCase>> = serde_json::from_value(json.clone())
        .map_err(|e| TestkitError::Json(format!("invalid stub document: {}", e)))?;

    let mut entries = Vec::new();
    for (member, cases) in cases {
        let spec = shape.member(&member).ok_or_else(|| {
            TestkitError::Json(format!("{} declares no member `{}`", shape.name, member))
        })?;
        for case in cases {
            if case.args.len() != spec.params.len() {
                return Err(TestkitError::Json(format!(
                    "`{}` takes {} argument(s), stub lists {}",
                    member,
                    spec.params.len(),
                    case.args.len()
                )));
            }
            let args = case
                .args
                .iter()
                .zip(&spec.params)
                .map(|(json, tag)| conform(Value::from_json(json), tag))
                .collect::<Result<Vec<_>, _>>()?;

            let behavior = match (case.returns, case.throws) {
                (Some(_), Some(_)) => {
                    return Err(TestkitError::Json(format!(
                        "stub for `{}` sets both `returns` and `throws`",
                        member
                    )))
                }
                (_, Some(message)) => Behavior::ThrowValue(Arc::new(ScriptedFailure(message))),
                (returns, None) => {
                    let raw = returns.map_or(Value::Null, |json| Value::from_json(&json));
                    let value = if spec.returns == TypeTag::Unit && raw.is_null() {
                        Value::Unit
                    } else {
                        conform(raw, &spec.returns)?
                    };
                    Behavior::ReturnValue(value)
                }
            };
            entries.push(StubEntry {
                member: member.clone(),
                args,
                behavior,
            });
        }
    }
    Ok(entries)
}

/// Read and parse a stub file.
pub fn stubs_from_path(shape: &Shape, path: &Path) -> Result<Vec<StubEntry>, TestkitError> {
    let content = fs::read_to_string(path)
        .map_err(|e| TestkitError::Json(format!("failed to read {:?}: {}", path, e)))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| TestkitError::Json(format!("failed to parse {:?}: {}", path, e)))?;
    stubs_from_json(shape, &json)
}

/// Reshape a JSON-derived value to fit `tag`.
pub fn conform(value: Value, tag: &TypeTag) -> Result<Value, TestkitError> {
    let mismatch = |value: &Value| TestkitError::Json(format!("{} does not fit {}", value, tag));
    let conformed = match (tag, value) {
        (TypeTag::Any, value) => value,
        (TypeTag::Optional(_), Value::Null | Value::Optional(None)) => Value::Optional(None),
        (TypeTag::Optional(inner), value) => {
            Value::Optional(Some(Box::new(conform(unwrap_optional(value), inner)?)))
        }
        (TypeTag::Seq(element), Value::Seq(items)) => Value::Seq(
            items
                .into_iter()
                .map(|item| conform(item, element))
                .collect::<Result<_, _>>()?,
        ),
        (TypeTag::Record(name), Value::Record(record)) => {
            let mut named = Record::new(if record.type_name.is_empty() {
                name.clone()
            } else {
                record.type_name
            });
            named.fields = record.fields;
            Value::Record(named)
        }
        (TypeTag::I8, Value::I64(n)) => i8::try_from(n).map(Value::I8).map_err(|_| mismatch(&Value::I64(n)))?,
        (TypeTag::I16, Value::I64(n)) => i16::try_from(n).map(Value::I16).map_err(|_| mismatch(&Value::I64(n)))?,
        (TypeTag::I32, Value::I64(n)) => i32::try_from(n).map(Value::I32).map_err(|_| mismatch(&Value::I64(n)))?,
        (TypeTag::U8, Value::I64(n)) => u8::try_from(n).map(Value::U8).map_err(|_| mismatch(&Value::I64(n)))?,
        (TypeTag::U16, Value::I64(n)) => u16::try_from(n).map(Value::U16).map_err(|_| mismatch(&Value::I64(n)))?,
        (TypeTag::U32, Value::I64(n)) => u32::try_from(n).map(Value::U32).map_err(|_| mismatch(&Value::I64(n)))?,
        (TypeTag::U64, Value::I64(n)) => u64::try_from(n).map(Value::U64).map_err(|_| mismatch(&Value::I64(n)))?,
        (TypeTag::F32, Value::F64(n)) => Value::F32(n as f32),
        (TypeTag::F32, Value::I64(n)) => Value::F32(n as f32),
        (TypeTag::F64, Value::I64(n)) => Value::F64(n as f64),
        (TypeTag::Char, Value::Str(s)) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(mismatch(&Value::Str(s))),
            }
        }
        (tag, value) if tag.accepts(&value) => value,
        (_, value) => return Err(mismatch(&value)),
    };
    Ok(conformed)
}

fn unwrap_optional(value: Value) -> Value {
    match value {
        Value::Optional(Some(inner)) => *inner,
        other => other,
    }
}
