//! The resolution core.
//!
//! A call that reaches a mock, whether through a generated proxy or a direct
//! [`Dispatcher::resolve`], is recorded in the mock's ledger and then answered
//! by the mock's stub table or, failing that, by the declared return type's
//! default. Each mock owns its tables; nothing here is shared between mock
//! identities.

use super::behavior::{Behavior, Outcome};
use super::ledger::InvocationLedger;
use super::selector::{MockId, Selector};
use super::stubs::StubTable;
use super::{read_lock, write_lock};
use crate::defaults::default_for;
use crate::factory::settings::MockSettings;
use crate::factory::shape::{MemberSpec, Shape};
use crate::logging;
use crate::value::Value;
use crate::{MockError, MockResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Everything owned by one mock identity.
#[derive(Debug)]
pub struct MockState {
    pub id: MockId,
    pub name: String,
    pub shape: Arc<Shape>,
    pub settings: MockSettings,
    pub stubs: StubTable,
    pub ledger: InvocationLedger,
}

impl MockState {
    /// Find `member` and check it can be answered by this mock.
    pub fn interceptable_member(&self, member: &str) -> MockResult<&MemberSpec> {
        let spec = self.shape.member(member).ok_or_else(|| {
            MockError::Misuse(format!(
                "{} declares no member `{}`",
                self.shape.name, member
            ))
        })?;
        if !self.settings.proxies(spec) {
            return Err(MockError::Misuse(format!(
                "`{}::{}` is a {:?} member and cannot be intercepted through {}; \
                 use the redirection protocol for it",
                self.shape.name, member, spec.kind, self.name
            )));
        }
        Ok(spec)
    }

    /// Check an argument vector against the declared parameter types.
    pub fn check_args(&self, spec: &MemberSpec, args: &[Value]) -> MockResult<()> {
        check_args(&self.shape.name, spec, args)
    }

    pub fn reset(&self) {
        self.stubs.clear();
        self.ledger.clear();
    }
}

pub(crate) fn check_args(owner: &str, spec: &MemberSpec, args: &[Value]) -> MockResult<()> {
    if spec.params.len() != args.len() {
        return Err(MockError::Misuse(format!(
            "`{}::{}` takes {} argument(s), got {}",
            owner,
            spec.name,
            spec.params.len(),
            args.len()
        )));
    }
    for (position, (tag, arg)) in spec.params.iter().zip(args).enumerate() {
        if !tag.accepts(arg) {
            return Err(MockError::Misuse(format!(
                "argument {} of `{}::{}` must be {}, got {} ({})",
                position,
                owner,
                spec.name,
                tag,
                arg.kind(),
                arg
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_return(owner: &str, spec: &MemberSpec, behavior: &Behavior) -> MockResult<()> {
    if let Behavior::ReturnValue(value) = behavior {
        if !spec.returns.accepts(value) {
            return Err(MockError::Misuse(format!(
                "`{}::{}` returns {}, cannot stub it with {} ({})",
                owner,
                spec.name,
                spec.returns,
                value.kind(),
                value
            )));
        }
    }
    Ok(())
}

/// Registry of live mocks and the entry point for resolving calls on them.
#[derive(Debug, Default)]
pub struct Dispatcher {
    mocks: RwLock<HashMap<MockId, Arc<MockState>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh identity with empty tables.
    pub(crate) fn register(&self, shape: Arc<Shape>, settings: MockSettings) -> Arc<MockState> {
        let id = MockId::next();
        let name = settings
            .name
            .clone()
            .unwrap_or_else(|| format!("Mock of {}{}", shape.name, id));
        let state = Arc::new(MockState {
            id,
            name,
            shape,
            settings,
            stubs: StubTable::new(),
            ledger: InvocationLedger::new(),
        });
        write_lock(&self.mocks).insert(id, Arc::clone(&state));
        logging::log_mock_created(&state.name, &state.shape.name);
        state
    }

    pub fn state(&self, id: MockId) -> MockResult<Arc<MockState>> {
        read_lock(&self.mocks)
            .get(&id)
            .cloned()
            .ok_or_else(|| MockError::Misuse(format!("mock {} is not registered with this dispatcher", id)))
    }

    pub fn contains(&self, id: MockId) -> bool {
        read_lock(&self.mocks).contains_key(&id)
    }

    /// Resolve one call.
    ///
    /// The stub lookup happens first so the ledger entry records whether a
    /// stub matched. The entry is appended before the behavior is applied,
    /// so an implementation that inspects the ledger sees its own call.
    pub fn resolve(&self, id: MockId, member: &str, args: Vec<Value>) -> MockResult<Outcome> {
        let state = self.state(id)?;
        let spec = state.interceptable_member(member)?;
        state.check_args(spec, &args)?;

        let selector = Selector::new(member, args);
        let behavior = state.stubs.lookup(&selector);
        let sequence = state.ledger.record(&selector, behavior.is_some());
        logging::log_invocation(&state.name, &selector, sequence, behavior.is_some());

        let outcome = match behavior {
            Some(behavior) => behavior.apply(&selector.args),
            None => Outcome::Default(default_for(&spec.returns)),
        };
        Ok(outcome)
    }

    /// Store `behavior` for `selector`, replacing any earlier behavior.
    pub fn configure(&self, id: MockId, selector: Selector, behavior: Behavior) -> MockResult<()> {
        let state = self.state(id)?;
        let spec = state.interceptable_member(&selector.member)?;
        state.check_args(spec, &selector.args)?;
        check_return(&state.shape.name, spec, &behavior)?;

        logging::log_stub_registered(&state.name, &selector, behavior.label());
        state.stubs.insert(selector, behavior);
        Ok(())
    }

    /// Clear the stubs and ledger of one mock, leaving every other mock and
    /// the global override table untouched.
    pub fn reset(&self, id: MockId) -> MockResult<()> {
        let state = self.state(id)?;
        state.reset();
        logging::log_mock_reset(&state.name);
        Ok(())
    }

    /// Forget a mock. Later calls through its handle fail with a misuse error.
    pub fn release(&self, id: MockId) -> bool {
        write_lock(&self.mocks).remove(&id).is_some()
    }

    /// Reset every mock registered here.
    pub fn reset_all(&self) {
        let states: Vec<_> = read_lock(&self.mocks).values().cloned().collect();
        for state in states {
            state.reset();
        }
        logging::log_mock_reset("*");
    }

    pub fn len(&self) -> usize {
        read_lock(&self.mocks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
