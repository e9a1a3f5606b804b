use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MOCK_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one mock: one stub table and one invocation ledger.
///
/// Ids are unique for the lifetime of the process, across dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MockId(u64);

impl MockId {
    pub(crate) fn next() -> Self {
        MockId(NEXT_MOCK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// "This member, called with these arguments."
///
/// Two selectors are equal when the member names are equal and the argument
/// vectors are equal element by element under [`Value`]'s structural
/// equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selector {
    pub member: String,
    pub args: Vec<Value>,
}

impl Selector {
    pub fn new(member: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            member: member.into(),
            args,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.member)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
