use super::{describe_recorded, CountCheck, Observed};
use crate::factory::MockHandle;
use crate::logging;
use crate::runtime::{MockState, Selector};
use crate::value::Value;
use crate::{MockError, MockResult};
use std::sync::Arc;

/// Start verifying calls made to `handle`.
pub fn verify(handle: &MockHandle) -> Verifier<'_> {
    Verifier { handle }
}

#[derive(Debug, Clone, Copy)]
pub struct Verifier<'a> {
    handle: &'a MockHandle,
}

impl<'a> Verifier<'a> {
    /// Select the calls to check. Unknown members and arguments that could
    /// never have been accepted are reported as misuse by the count method.
    pub fn method(self, member: &str, args: Vec<Value>) -> CountCheck {
        CountCheck::new(self.observe(member, args))
    }

    /// Fail if the mock has received any call at all.
    pub fn no_interactions(self) -> MockResult<()> {
        let state = self.state()?;
        let records = state.ledger.records();
        if records.is_empty() {
            return Ok(());
        }
        let listing = records
            .iter()
            .map(|r| format!("\n  - {}", r.selector))
            .collect::<String>();
        logging::log_verification_failed(&state.name, &"*", "never", records.len());
        Err(MockError::Verification {
            selector: format!("{}.*", state.name),
            expected: "no interactions".to_string(),
            actual: records.len(),
            recorded: format!("recorded calls:{}", listing),
        })
    }

    fn state(&self) -> MockResult<Arc<MockState>> {
        self.handle.dispatcher().state(self.handle.id())
    }

    fn observe(&self, member: &str, args: Vec<Value>) -> MockResult<Observed> {
        let state = self.state()?;
        let spec = state.interceptable_member(member)?;
        state.check_args(spec, &args)?;

        let selector = Selector::new(member, args);
        let actual = state.ledger.count(&selector);
        let recorded = state.ledger.invocations(member);
        Ok(Observed {
            subject: state.name.clone(),
            selector,
            actual,
            recorded,
        })
    }
}

/// Calls to `member` that were recorded, rendered for a failure message.
pub fn describe_calls(handle: &MockHandle, member: &str) -> MockResult<String> {
    Ok(describe_recorded(member, &handle.invocations(member)?))
}
