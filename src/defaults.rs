//! The "no behavior configured" value for each declared return type.
//!
//! The table is explicit: every [`TypeTag`] maps to exactly one default and
//! nothing is inferred at run time.

use crate::value::{TypeTag, Value};

/// Default result for a member whose call matched no stub.
pub fn default_for(tag: &TypeTag) -> Value {
    match tag {
        TypeTag::Unit => Value::Unit,
        TypeTag::Bool => Value::Bool(false),
        TypeTag::Char => Value::Char('\0'),
        TypeTag::I8 => Value::I8(0),
        TypeTag::I16 => Value::I16(0),
        TypeTag::I32 => Value::I32(0),
        TypeTag::I64 => Value::I64(0),
        TypeTag::U8 => Value::U8(0),
        TypeTag::U16 => Value::U16(0),
        TypeTag::U32 => Value::U32(0),
        TypeTag::U64 => Value::U64(0),
        TypeTag::F32 => Value::F32(0.0),
        TypeTag::F64 => Value::F64(0.0),
        TypeTag::Str => Value::Str(String::new()),
        TypeTag::Optional(_) => Value::Optional(None),
        TypeTag::Seq(_) => Value::Seq(Vec::new()),
        TypeTag::Record(_) | TypeTag::Any => Value::Null,
    }
}
