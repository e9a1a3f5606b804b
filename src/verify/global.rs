//! Verification of calls that went through the redirection protocol.
//!
//! Only armed keys are counted: a key is armed by installing an override or
//! by [`watch_static`](crate::redirect::watch_static) and
//! [`watch_constructor`](crate::redirect::watch_constructor). Calls to an
//! armed key are counted whether or not they proceed, until the matching
//! reset clears the entry. An unarmed key always reports zero calls.

use super::{CountCheck, Observed};
use crate::redirect::{GlobalOverrideTable, InstanceKey, OwnerType, RedirectKey, Signature};
use crate::runtime::Selector;
use crate::value::Value;

/// Check calls to the static member `member` of `O` made with `args`.
pub fn verify_static_calls<O: ?Sized + 'static>(member: &str, args: Vec<Value>) -> CountCheck {
    let owner = OwnerType::of::<O>();
    observe(owner.name().to_string(), RedirectKey::static_member(owner, member), args)
}

/// Check constructions of `O` through the constructor taking `signature`.
pub fn verify_constructor_calls<O: ?Sized + 'static>(signature: &Signature, args: Vec<Value>) -> CountCheck {
    let owner = OwnerType::of::<O>();
    let key = RedirectKey::constructor(owner, signature.clone());
    observe(owner.name().to_string(), key, args)
}

pub fn verify_private_calls(instance: impl Into<InstanceKey>, member: &str, args: Vec<Value>) -> CountCheck {
    let instance = instance.into();
    observe(instance.to_string(), RedirectKey::private_member(instance, member), args)
}

fn observe(subject: String, key: RedirectKey, args: Vec<Value>) -> CountCheck {
    let table = GlobalOverrideTable::global();
    let actual = table.count(&key, &args);
    let recorded = table.calls(&key);
    CountCheck::new(Ok(Observed {
        subject,
        selector: Selector::new(key.member(), args),
        actual,
        recorded,
    }))
}
