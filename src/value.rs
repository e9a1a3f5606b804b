//! Dynamically typed values that flow through the resolution core.
//!
//! Every argument passed to a mocked member and every configured return value
//! is carried as a [`Value`]. Equality is structural and never coerces
//! between numeric widths, so `Value::I32(1)` and `Value::I64(1)` are
//! different selectors. Floating point values compare by bit pattern, which
//! keeps `Eq` and `Hash` consistent (`NaN == NaN`, `0.0 != -0.0`).

use crate::{MockError, MockResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single argument or return value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// The value of a member that returns nothing.
    Unit,
    /// An absent object reference.
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Optional(Option<Box<Value>>),
    Seq(Vec<Value>),
    Record(Record),
}

/// A named bag of fields standing in for a domain object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub type_name: String,
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Remove a field and convert it, failing when it is missing or has the
    /// wrong type.
    pub fn take<T: FromValue>(&mut self, name: &str) -> MockResult<T> {
        let value = self.fields.remove(name).ok_or_else(|| MockError::Conversion {
            expected: format!("field `{}` on {}", name, self.type_name),
            found: "missing field".to_string(),
        })?;
        T::from_value(value)
    }
}

impl Value {
    /// Short name of the variant, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
            Value::Optional(_) => "optional",
            Value::Seq(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    /// The most specific type tag describing this value.
    ///
    /// Empty containers and `Null` have no element information and map to
    /// [`TypeTag::Any`] in the relevant position.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Unit => TypeTag::Unit,
            Value::Null => TypeTag::Any,
            Value::Bool(_) => TypeTag::Bool,
            Value::Char(_) => TypeTag::Char,
            Value::I8(_) => TypeTag::I8,
            Value::I16(_) => TypeTag::I16,
            Value::I32(_) => TypeTag::I32,
            Value::I64(_) => TypeTag::I64,
            Value::U8(_) => TypeTag::U8,
            Value::U16(_) => TypeTag::U16,
            Value::U32(_) => TypeTag::U32,
            Value::U64(_) => TypeTag::U64,
            Value::F32(_) => TypeTag::F32,
            Value::F64(_) => TypeTag::F64,
            Value::Str(_) => TypeTag::Str,
            Value::Optional(None) => TypeTag::optional(TypeTag::Any),
            Value::Optional(Some(inner)) => TypeTag::optional(inner.type_tag()),
            Value::Seq(items) => {
                let mut tags = items.iter().map(Value::type_tag);
                let element = match tags.next() {
                    Some(first) if tags.all(|t| t == first) => first,
                    _ => TypeTag::Any,
                };
                TypeTag::seq(element)
            }
            Value::Record(record) => TypeTag::Record(record.type_name.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Map a JSON document into a value.
    ///
    /// Integers become `I64` (or `U64` when they do not fit), other numbers
    /// become `F64`, arrays become sequences and objects become records with
    /// an empty type name.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => Value::Seq(items.iter().map(Value::from_json).collect()),
            serde_json::Value::Object(map) => Value::Record(Record {
                type_name: String::new(),
                fields: map
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Unit, Unit) | (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (I8(a), I8(b)) => a == b,
            (I16(a), I16(b)) => a == b,
            (I32(a), I32(b)) => a == b,
            (I64(a), I64(b)) => a == b,
            (U8(a), U8(b)) => a == b,
            (U16(a), U16(b)) => a == b,
            (U32(a), U32(b)) => a == b,
            (U64(a), U64(b)) => a == b,
            (F32(a), F32(b)) => a.to_bits() == b.to_bits(),
            (F64(a), F64(b)) => a.to_bits() == b.to_bits(),
            (Str(a), Str(b)) => a == b,
            (Optional(a), Optional(b)) => a == b,
            (Seq(a), Seq(b)) => a == b,
            (Record(a), Record(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Unit | Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Char(v) => v.hash(state),
            Value::I8(v) => v.hash(state),
            Value::I16(v) => v.hash(state),
            Value::I32(v) => v.hash(state),
            Value::I64(v) => v.hash(state),
            Value::U8(v) => v.hash(state),
            Value::U16(v) => v.hash(state),
            Value::U32(v) => v.hash(state),
            Value::U64(v) => v.hash(state),
            Value::F32(v) => v.to_bits().hash(state),
            Value::F64(v) => v.to_bits().hash(state),
            Value::Str(v) => v.hash(state),
            Value::Optional(v) => v.hash(state),
            Value::Seq(v) => v.hash(state),
            Value::Record(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{:?}", v),
            Value::I8(v) => write!(f, "{}i8", v),
            Value::I16(v) => write!(f, "{}i16", v),
            Value::I32(v) => write!(f, "{}i32", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}u8", v),
            Value::U16(v) => write!(f, "{}u16", v),
            Value::U32(v) => write!(f, "{}u32", v),
            Value::U64(v) => write!(f, "{}u64", v),
            Value::F32(v) => write!(f, "{}f32", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Optional(None) => write!(f, "None"),
            Value::Optional(Some(v)) => write!(f, "Some({})", v),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Record(record) => {
                write!(f, "{} {{", record.type_name)?;
                for (i, (name, value)) in record.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}: {}", name, value)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// Declared type of a parameter or return slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Unit,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,
    Optional(Box<TypeTag>),
    Seq(Box<TypeTag>),
    Record(String),
    /// Accepts every value; used for untyped slots.
    Any,
}

impl TypeTag {
    pub fn optional(inner: TypeTag) -> Self {
        TypeTag::Optional(Box::new(inner))
    }

    pub fn seq(element: TypeTag) -> Self {
        TypeTag::Seq(Box::new(element))
    }

    pub fn record(name: impl Into<String>) -> Self {
        TypeTag::Record(name.into())
    }

    /// Whether `value` may occupy a slot of this type.
    ///
    /// `Null` fits record, optional and `Any` slots. Record slots also accept
    /// anonymous records (empty type name) so JSON-loaded fixtures can be used.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeTag::Any, _) => true,
            (TypeTag::Unit, Value::Unit) => true,
            (TypeTag::Bool, Value::Bool(_)) => true,
            (TypeTag::Char, Value::Char(_)) => true,
            (TypeTag::I8, Value::I8(_)) => true,
            (TypeTag::I16, Value::I16(_)) => true,
            (TypeTag::I32, Value::I32(_)) => true,
            (TypeTag::I64, Value::I64(_)) => true,
            (TypeTag::U8, Value::U8(_)) => true,
            (TypeTag::U16, Value::U16(_)) => true,
            (TypeTag::U32, Value::U32(_)) => true,
            (TypeTag::U64, Value::U64(_)) => true,
            (TypeTag::F32, Value::F32(_)) => true,
            (TypeTag::F64, Value::F64(_)) => true,
            (TypeTag::Str, Value::Str(_)) => true,
            (TypeTag::Optional(_), Value::Null) => true,
            (TypeTag::Optional(_), Value::Optional(None)) => true,
            (TypeTag::Optional(inner), Value::Optional(Some(v))) => inner.accepts(v),
            (TypeTag::Seq(element), Value::Seq(items)) => items.iter().all(|v| element.accepts(v)),
            (TypeTag::Record(_), Value::Null) => true,
            (TypeTag::Record(name), Value::Record(record)) => {
                record.type_name == *name || record.type_name.is_empty()
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Unit => write!(f, "()"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Char => write!(f, "char"),
            TypeTag::I8 => write!(f, "i8"),
            TypeTag::I16 => write!(f, "i16"),
            TypeTag::I32 => write!(f, "i32"),
            TypeTag::I64 => write!(f, "i64"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::F32 => write!(f, "f32"),
            TypeTag::F64 => write!(f, "f64"),
            TypeTag::Str => write!(f, "String"),
            TypeTag::Optional(inner) => write!(f, "Option<{}>", inner),
            TypeTag::Seq(element) => write!(f, "Vec<{}>", element),
            TypeTag::Record(name) => write!(f, "{}", name),
            TypeTag::Any => write!(f, "_"),
        }
    }
}

/// Conversion from a [`Value`] back into a Rust type.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> MockResult<Self>;
}

fn mismatch<T>(expected: &str, found: &Value) -> MockResult<T> {
    Err(MockError::Conversion {
        expected: expected.to_string(),
        found: found.kind().to_string(),
    })
}

macro_rules! primitive_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl From<&$ty> for Value {
                fn from(v: &$ty) -> Self {
                    Value::$variant(*v)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> MockResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => mismatch(stringify!($ty), &other),
                    }
                }
            }
        )*
    };
}

primitive_value! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl FromValue for () {
    fn from_value(value: Value) -> MockResult<Self> {
        match value {
            Value::Unit | Value::Null => Ok(()),
            other => mismatch("()", &other),
        }
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> MockResult<Self> {
        match value {
            Value::Str(v) => Ok(v),
            other => mismatch("String", &other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Optional(v.map(|inner| Box::new(inner.into())))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> MockResult<Self> {
        match value {
            Value::Null | Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> MockResult<Self> {
        match value {
            Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
            other => mismatch("Vec", &other),
        }
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl FromValue for Record {
    fn from_value(value: Value) -> MockResult<Self> {
        match value {
            Value::Record(record) => Ok(record),
            other => mismatch("record", &other),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> MockResult<Self> {
        Ok(value)
    }
}

/// Build an argument vector: `args![1i64, "name", user]`.
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
