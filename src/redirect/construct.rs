//! Constructor substitution when the original construction cannot be skipped.
//!
//! [`construct`](super::construct) replaces construction outright. Some call
//! sites must always run the real constructor (for instance because it
//! registers the new object somewhere). For those, [`construct_in_place`]
//! builds the object normally and then copies the fields of the configured
//! instance over it.
//!
//! This is an approximation: side effects of the real constructor still
//! happen, and any state not exposed through [`FieldCopy`] keeps the value the
//! real constructor gave it.

use super::hooks::resolve_constructor_call;
use super::keys::{OwnerType, Signature};
use crate::runtime::Redirect;
use crate::value::{Record, Value};
use crate::{MockError, MockResult};

/// Shallow field copy from a configured instance.
pub trait FieldCopy {
    /// Overwrite the fields of `self` named in `source`. Fields absent from
    /// `source` are left alone.
    fn copy_fields_from(&mut self, source: &Record) -> MockResult<()>;
}

/// Construct with `original`, then overlay the override's fields, if any.
pub fn construct_in_place<O, F>(signature: &Signature, args: Vec<Value>, original: F) -> MockResult<O>
where
    O: FieldCopy + 'static,
    F: FnOnce() -> O,
{
    let answer = resolve_constructor_call(OwnerType::of::<O>(), &args, signature)?;
    let mut instance = original();
    match answer {
        Redirect::Proceed(_) => {}
        Redirect::Value(Value::Record(source)) => instance.copy_fields_from(&source)?,
        Redirect::Value(other) => {
            return Err(MockError::Conversion {
                expected: format!("record for {}", OwnerType::of::<O>().short_name()),
                found: other.kind().to_string(),
            })
        }
    }
    Ok(instance)
}
