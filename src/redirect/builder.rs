use super::keys::{InstanceKey, OwnerType, RedirectKey, Signature};
use super::table::GlobalOverrideTable;
use crate::logging;
use crate::runtime::{Behavior, Failure, MockId};
use crate::value::Value;
use crate::{MockError, MockResult};
use std::error::Error;
use std::marker::PhantomData;
use std::sync::Arc;

/// Configures one entry of the global override table.
#[derive(Debug)]
#[must_use = "an override is only installed by one of the `then_*` methods"]
pub struct OverrideBuilder {
    table: &'static GlobalOverrideTable,
    key: RedirectKey,
}

/// Override a static member of `O` for every caller.
pub fn when_static<O: ?Sized + 'static>(member: &str) -> OverrideBuilder {
    OverrideBuilder::new(RedirectKey::static_member(OwnerType::of::<O>(), member))
}

/// Override the constructor of `O` taking `signature`.
pub fn when_constructor<O: ?Sized + 'static>(signature: Signature) -> OverrideBuilder {
    OverrideBuilder::new(RedirectKey::constructor(OwnerType::of::<O>(), signature))
}

/// Override a private member of one receiver.
///
/// The override lives in the returned guard, which keeps `receiver`
/// borrowed. The receiver cannot move or be freed while the override is
/// installed, and dropping the guard removes the override and its call
/// log, so a later value allocated at the same address starts clean.
pub fn when_private<'a, T: ?Sized + 'static>(receiver: &'a T, member: &str) -> PrivateOverrideBuilder<'a> {
    let instance = InstanceKey::of(receiver);
    PrivateOverrideBuilder {
        inner: OverrideBuilder::new(RedirectKey::private_member(instance, member)),
        instance,
        receiver: PhantomData,
    }
}

/// Override a private member of a mock. Mock identities are never reused,
/// so the override stays until [`reset_private`](super::reset_private).
pub fn when_private_mock(id: MockId, member: &str) -> OverrideBuilder {
    OverrideBuilder::new(RedirectKey::private_member(InstanceKey::Mock(id), member))
}

/// Log calls to a static member of `O` that has no override, so they can
/// be verified. The log is dropped by the resets that cover the member.
pub fn watch_static<O: ?Sized + 'static>(member: &str) {
    GlobalOverrideTable::global().arm(RedirectKey::static_member(OwnerType::of::<O>(), member));
}

/// Log constructions of `O` through `signature` that have no override.
pub fn watch_constructor<O: ?Sized + 'static>(signature: &Signature) {
    GlobalOverrideTable::global().arm(RedirectKey::constructor(OwnerType::of::<O>(), signature.clone()));
}

impl OverrideBuilder {
    pub fn new(key: RedirectKey) -> Self {
        Self {
            table: GlobalOverrideTable::global(),
            key,
        }
    }

    pub fn key(&self) -> &RedirectKey {
        &self.key
    }

    pub fn then_return(self, value: impl Into<Value>) -> MockResult<()> {
        let value = value.into();
        if matches!(self.key, RedirectKey::Constructor { .. }) && value == Value::Unit {
            return Err(MockError::Misuse(format!(
                "constructor override {} must produce an instance, not ()",
                self.key
            )));
        }
        self.install(Behavior::ReturnValue(value))
    }

    pub fn then_throw<E>(self, error: E) -> MockResult<()>
    where
        E: Error + Send + Sync + 'static,
    {
        self.then_throw_shared(Arc::new(error))
    }

    /// Raise this exact failure object on every redirected call.
    pub fn then_throw_shared(self, failure: Failure) -> MockResult<()> {
        self.install(Behavior::ThrowValue(failure))
    }

    pub fn then_implement<F>(self, f: F) -> MockResult<()>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.install(Behavior::implementation(f))
    }

    /// An implementation whose `Err` is raised as [`MockError::Stubbed`].
    pub fn then_try_implement<F>(self, f: F) -> MockResult<()>
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + Send + Sync + 'static,
    {
        self.install(Behavior::fallible(f))
    }

    fn install(self, behavior: Behavior) -> MockResult<()> {
        self.table.install(self.key, behavior);
        Ok(())
    }
}

/// Second half of [`when_private`].
#[derive(Debug)]
#[must_use = "an override is only installed by one of the `then_*` methods"]
pub struct PrivateOverrideBuilder<'a> {
    inner: OverrideBuilder,
    instance: InstanceKey,
    receiver: PhantomData<&'a ()>,
}

impl<'a> PrivateOverrideBuilder<'a> {
    pub fn key(&self) -> &RedirectKey {
        self.inner.key()
    }

    pub fn then_return(self, value: impl Into<Value>) -> MockResult<PrivateOverride<'a>> {
        self.install(Behavior::ReturnValue(value.into()))
    }

    pub fn then_throw<E>(self, error: E) -> MockResult<PrivateOverride<'a>>
    where
        E: Error + Send + Sync + 'static,
    {
        self.then_throw_shared(Arc::new(error))
    }

    pub fn then_throw_shared(self, failure: Failure) -> MockResult<PrivateOverride<'a>> {
        self.install(Behavior::ThrowValue(failure))
    }

    pub fn then_implement<F>(self, f: F) -> MockResult<PrivateOverride<'a>>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.install(Behavior::implementation(f))
    }

    pub fn then_try_implement<F>(self, f: F) -> MockResult<PrivateOverride<'a>>
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + Send + Sync + 'static,
    {
        self.install(Behavior::fallible(f))
    }

    fn install(self, behavior: Behavior) -> MockResult<PrivateOverride<'a>> {
        let table = self.inner.table;
        let key = self.inner.key.clone();
        self.inner.install(behavior)?;
        Ok(PrivateOverride {
            table,
            key,
            instance: self.instance,
            receiver: PhantomData,
        })
    }
}

/// An installed private override. Dropping it removes every entry for its
/// receiver and member, including one installed later through another guard.
#[derive(Debug)]
#[must_use = "the override is removed as soon as the guard is dropped"]
pub struct PrivateOverride<'a> {
    table: &'static GlobalOverrideTable,
    key: RedirectKey,
    instance: InstanceKey,
    receiver: PhantomData<&'a ()>,
}

impl PrivateOverride<'_> {
    pub fn key(&self) -> &RedirectKey {
        &self.key
    }

    /// The receiver identity, for [`verify_private_calls`](crate::verify::verify_private_calls).
    pub fn instance(&self) -> InstanceKey {
        self.instance
    }
}

impl Drop for PrivateOverride<'_> {
    fn drop(&mut self) {
        let removed = self.table.remove_where(|key| *key == self.key);
        logging::log_global_reset(&self.key.to_string(), removed);
    }
}
