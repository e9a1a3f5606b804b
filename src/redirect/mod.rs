//! The redirection protocol for members a dispatch proxy cannot reach.
//!
//! Constructors, static members and private members are intercepted at the
//! call site instead of through a proxy. The call site asks the global
//! override table for an answer first and runs its own body only when told
//! to proceed. Overrides are keyed by shape (owner type plus member or
//! signature, or receiver plus member for private calls), never by argument
//! values. Constructor and static overrides stay installed until one of the
//! resets below removes them; a private override on a plain receiver ends
//! when its [`PrivateOverride`] guard drops. Resetting a mock never touches
//! this table.

pub mod builder;
pub mod construct;
pub mod hooks;
pub mod keys;
pub mod table;

pub use builder::{
    watch_constructor, watch_static, when_constructor, when_private, when_private_mock, when_static,
    OverrideBuilder, PrivateOverride, PrivateOverrideBuilder,
};
pub use construct::{construct_in_place, FieldCopy};
pub use hooks::{
    construct, private_call, resolve_constructor_call, resolve_private_call, resolve_static_call,
    static_call,
};
pub use keys::{InstanceKey, OwnerType, RedirectKey, Signature};
pub use table::GlobalOverrideTable;

use crate::logging;

/// Remove every constructor and static override of `O`.
pub fn reset_global<O: ?Sized + 'static>() -> usize {
    let owner = OwnerType::of::<O>();
    let removed = GlobalOverrideTable::global().clear_owner(owner);
    logging::log_global_reset(owner.name(), removed);
    removed
}

/// Remove the constructor override of `O` for one signature.
pub fn reset_global_signature<O: ?Sized + 'static>(signature: &Signature) -> usize {
    let owner = OwnerType::of::<O>();
    let removed = GlobalOverrideTable::global().clear_signature(owner, signature);
    logging::log_global_reset(&format!("{}::new{}", owner, signature), removed);
    removed
}

pub fn reset_static<O: ?Sized + 'static>(member: &str) -> usize {
    let owner = OwnerType::of::<O>();
    let removed = GlobalOverrideTable::global().clear_static(owner, member);
    logging::log_global_reset(&format!("{}::{}", owner, member), removed);
    removed
}

/// Remove every private override layered on `instance`.
pub fn reset_private(instance: impl Into<InstanceKey>) -> usize {
    let instance = instance.into();
    let removed = GlobalOverrideTable::global().clear_instance(instance);
    logging::log_global_reset(&instance.to_string(), removed);
    removed
}

/// Empty the global override table. Other tests running in the same
/// process lose their overrides too.
pub fn reset_all_global() -> usize {
    let removed = GlobalOverrideTable::global().clear();
    logging::log_global_reset("*", removed);
    removed
}
