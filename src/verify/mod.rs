//! Assertions over recorded calls.
//!
//! Verification only reads ledgers. A check compares the number of calls
//! recorded for one selector against an expected [`Times`] and fails with
//! [`MockError::Verification`] naming the selector, both counts and the
//! calls that were recorded for the same member.

pub mod builder;
pub mod global;

pub use builder::{verify, Verifier};
pub use global::{verify_constructor_calls, verify_private_calls, verify_static_calls};

use crate::logging;
use crate::runtime::Selector;
use crate::value::Value;
use crate::{MockError, MockResult};
use std::fmt;

/// Expected number of matching calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Exactly(usize),
    /// Present at least once; the count is otherwise unchecked.
    AtLeastOnce,
}

impl Times {
    pub fn matches(self, actual: usize) -> bool {
        match self {
            Times::Exactly(n) => actual == n,
            Times::AtLeastOnce => actual > 0,
        }
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Times::Exactly(1) => write!(f, "exactly once"),
            Times::Exactly(n) => write!(f, "{} time(s)", n),
            Times::AtLeastOnce => write!(f, "at least once"),
        }
    }
}

/// Snapshot of the ledger entries relevant to one selector.
#[derive(Debug, Clone)]
pub(crate) struct Observed {
    pub subject: String,
    pub selector: Selector,
    pub actual: usize,
    /// Argument vectors of every call to the selector's member.
    pub recorded: Vec<Vec<Value>>,
}

/// Final step of a verification: state the expected count.
#[derive(Debug)]
#[must_use = "nothing is verified until a count method is called"]
pub struct CountCheck {
    observed: MockResult<Observed>,
}

impl CountCheck {
    pub(crate) fn new(observed: MockResult<Observed>) -> Self {
        Self { observed }
    }

    pub fn times(self, expected: usize) -> MockResult<()> {
        self.expect(Times::Exactly(expected))
    }

    pub fn once(self) -> MockResult<()> {
        self.times(1)
    }

    pub fn never(self) -> MockResult<()> {
        self.times(0)
    }

    pub fn at_least_once(self) -> MockResult<()> {
        self.expect(Times::AtLeastOnce)
    }

    pub fn expect(self, expected: Times) -> MockResult<()> {
        let observed = self.observed?;
        if expected.matches(observed.actual) {
            logging::log_verification_passed(&observed.subject, &observed.selector, observed.actual);
            return Ok(());
        }
        logging::log_verification_failed(
            &observed.subject,
            &observed.selector,
            &expected.to_string(),
            observed.actual,
        );
        Err(MockError::Verification {
            selector: format!("{}.{}", observed.subject, observed.selector),
            expected: expected.to_string(),
            actual: observed.actual,
            recorded: describe_recorded(&observed.selector.member, &observed.recorded),
        })
    }
}

pub(crate) fn describe_recorded(member: &str, recorded: &[Vec<Value>]) -> String {
    if recorded.is_empty() {
        return format!("no calls to `{}` were recorded", member);
    }
    let mut out = format!("recorded calls to `{}`:", member);
    for args in recorded {
        out.push_str("\n  - ");
        out.push_str(&Selector::new(member, args.clone()).to_string());
    }
    out
}
