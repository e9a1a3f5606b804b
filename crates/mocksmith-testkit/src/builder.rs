use crate::json::{stubs_from_json, stubs_from_path, StubEntry};
use crate::TestkitError;
use mocksmith::{Behavior, Failure, MockFactory, MockHandle, MockSettings, Shape, Value};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

/// Builds a mock and its stubs in one expression.
///
/// Stubs are applied in the order they were added; a later stub for the
/// same member and arguments replaces an earlier one.
pub struct MockBuilder {
    factory: MockFactory,
    shape: Shape,
    settings: MockSettings,
    stubs: Vec<StubEntry>,
}

impl MockBuilder {
    pub fn new(shape: Shape) -> Self {
        Self::from_factory(mocksmith::default_factory().clone(), shape)
    }

    pub fn from_factory(factory: MockFactory, shape: Shape) -> Self {
        let settings = factory.defaults().clone();
        Self {
            factory,
            shape,
            settings,
            stubs: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: MockSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.settings = self.settings.name(name);
        self
    }

    pub fn with_stub(self, member: &str, args: Vec<Value>, returns: impl Into<Value>) -> Self {
        self.push(member, args, Behavior::ReturnValue(returns.into()))
    }

    pub fn with_failure<E>(self, member: &str, args: Vec<Value>, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.push(member, args, Behavior::ThrowValue(Arc::new(error)))
    }

    pub fn with_implementation<F>(self, member: &str, args: Vec<Value>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.push(member, args, Behavior::implementation(f))
    }

    /// An implementation that may raise; `Err` surfaces as a stubbed failure.
    pub fn with_fallible_implementation<F>(self, member: &str, args: Vec<Value>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + Send + Sync + 'static,
    {
        self.push(member, args, Behavior::fallible(f))
    }

    /// Add every stub of a JSON stub document.
    pub fn with_stubs_json(mut self, json: &serde_json::Value) -> Result<Self, TestkitError> {
        let entries = stubs_from_json(&self.shape, json)?;
        self.stubs.extend(entries);
        Ok(self)
    }

    pub fn with_stubs_file(mut self, path: &Path) -> Result<Self, TestkitError> {
        let entries = stubs_from_path(&self.shape, path)?;
        self.stubs.extend(entries);
        Ok(self)
    }

    /// Create the mock and configure its stubs.
    pub fn build(self) -> Result<MockHandle, TestkitError> {
        let handle = self.factory.create_mock_with(self.shape, self.settings)?;
        for stub in self.stubs {
            let when = mocksmith::when(&handle, &stub.member, stub.args);
            match stub.behavior {
                Behavior::ReturnValue(value) => when.then_return(value)?,
                Behavior::ThrowValue(failure) => when.then_throw_shared(failure)?,
                Behavior::Implementation(f) => when.then_try_implement(move |args| f(args))?,
            }
        }
        Ok(handle)
    }

    fn push(mut self, member: &str, args: Vec<Value>, behavior: Behavior) -> Self {
        self.stubs.push(StubEntry {
            member: member.to_string(),
            args,
            behavior,
        });
        self
    }
}
