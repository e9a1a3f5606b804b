//! Entry points for call sites that consult the global override table
//! before running their own body.
//!
//! Production code opts into interception by routing a constructor, static
//! or private call through one of these functions. Each returns either a
//! value to use in place of the body or [`Redirect::Proceed`], after which
//! the caller runs the original body unmodified.

use super::keys::{InstanceKey, OwnerType, RedirectKey, Signature};
use super::table::GlobalOverrideTable;
use crate::runtime::Redirect;
use crate::value::{FromValue, Value};
use crate::{MockError, MockResult};

pub fn resolve_constructor_call(
    owner: OwnerType,
    args: &[Value],
    signature: &Signature,
) -> MockResult<Redirect> {
    if !signature.accepts(args) {
        return Err(MockError::Misuse(format!(
            "arguments ({}) do not match constructor signature {}{}",
            join(args),
            owner,
            signature
        )));
    }
    GlobalOverrideTable::global().resolve(&RedirectKey::constructor(owner, signature.clone()), args)
}

/// Consult the override of a static member. A stored `ThrowValue`
/// surfaces as [`MockError::Stubbed`].
pub fn resolve_static_call(owner: OwnerType, member: &str, args: &[Value]) -> MockResult<Redirect> {
    GlobalOverrideTable::global().resolve(&RedirectKey::static_member(owner, member), args)
}

pub fn resolve_private_call(
    instance: InstanceKey,
    member: &str,
    args: &[Value],
) -> MockResult<Redirect> {
    GlobalOverrideTable::global().resolve(&RedirectKey::private_member(instance, member), args)
}

/// Typed seam for a static member: the override's value, or `original()`.
pub fn static_call<O, T, F>(member: &str, args: Vec<Value>, original: F) -> MockResult<T>
where
    O: ?Sized + 'static,
    T: FromValue,
    F: FnOnce() -> T,
{
    finish(resolve_static_call(OwnerType::of::<O>(), member, &args)?, original)
}

/// Typed seam for a private member of `receiver`. The receiver is keyed
/// by its address and type.
pub fn private_call<R, T, F>(receiver: &R, member: &str, args: Vec<Value>, original: F) -> MockResult<T>
where
    R: ?Sized + 'static,
    T: FromValue,
    F: FnOnce() -> T,
{
    finish(resolve_private_call(InstanceKey::of(receiver), member, &args)?, original)
}

/// Typed seam for a constructor: the pre-built instance from the override,
/// or a freshly constructed one.
pub fn construct<O, F>(signature: &Signature, args: Vec<Value>, original: F) -> MockResult<O>
where
    O: FromValue + 'static,
    F: FnOnce() -> O,
{
    finish(resolve_constructor_call(OwnerType::of::<O>(), &args, signature)?, original)
}

fn finish<T: FromValue>(answer: Redirect, original: impl FnOnce() -> T) -> MockResult<T> {
    match answer {
        Redirect::Proceed(_) => Ok(original()),
        Redirect::Value(value) => T::from_value(value),
    }
}

fn join(args: &[Value]) -> String {
    args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ")
}
