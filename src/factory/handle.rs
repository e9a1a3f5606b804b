use super::shape::Shape;
use crate::redirect::InstanceKey;
use crate::runtime::{Dispatcher, InvocationRecord, MockId, Outcome};
use crate::value::{FromValue, Value};
use crate::MockResult;
use std::fmt;
use std::sync::Arc;

/// How calls reach a mock created by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// Every interceptable member forwards to the dispatcher.
    Dispatch,
    /// No member can be proxied; the shape is only reachable through the
    /// redirection protocol.
    Plain,
}

/// The identity returned by `mock(...)`.
///
/// Cloning a handle does not create a new mock: clones share one stub table
/// and one ledger, and may be sent to other threads.
#[derive(Clone)]
pub struct MockHandle {
    id: MockId,
    name: Arc<str>,
    shape: Arc<Shape>,
    proxy: ProxyKind,
    dispatcher: Arc<Dispatcher>,
}

impl MockHandle {
    pub(crate) fn new(
        id: MockId,
        name: &str,
        shape: Arc<Shape>,
        proxy: ProxyKind,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            id,
            name: Arc::from(name),
            shape,
            proxy,
            dispatcher,
        }
    }

    pub fn id(&self) -> MockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn proxy_kind(&self) -> ProxyKind {
        self.proxy
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Key under which private-member overrides for this mock are stored.
    pub fn instance_key(&self) -> InstanceKey {
        InstanceKey::from(self.id)
    }

    /// Route one call through the resolution core.
    pub fn invoke(&self, member: &str, args: Vec<Value>) -> MockResult<Outcome> {
        self.dispatcher.resolve(self.id, member, args)
    }

    /// Route one call and convert its result, surfacing a configured
    /// failure as `MockError::Stubbed`.
    pub fn call<T: FromValue>(&self, member: &str, args: Vec<Value>) -> MockResult<T> {
        let value = self.invoke(member, args)?.into_result()?;
        T::from_value(value)
    }

    /// Calls received so far, in arrival order.
    pub fn recorded_calls(&self) -> MockResult<Vec<InvocationRecord>> {
        Ok(self.dispatcher.state(self.id)?.ledger.records())
    }

    /// Argument vectors of every call to `member`.
    pub fn invocations(&self, member: &str) -> MockResult<Vec<Vec<Value>>> {
        Ok(self.dispatcher.state(self.id)?.ledger.invocations(member))
    }
}

impl PartialEq for MockHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MockHandle {}

impl fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("shape", &self.shape.name)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl fmt::Display for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
