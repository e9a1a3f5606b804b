use super::selector::Selector;
use crate::value::Value;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// One observed call, kept in arrival order for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationRecord {
    pub sequence: u64,
    pub selector: Selector,
    /// Whether a configured behavior answered the call.
    pub stubbed: bool,
}

#[derive(Debug, Default)]
struct LedgerInner {
    by_selector: HashMap<Selector, Vec<Vec<Value>>>,
    records: Vec<InvocationRecord>,
}

/// Append-only record of the calls a mock has received.
///
/// Entries are appended whether or not a stub matched. The only way to drop
/// entries is [`InvocationLedger::clear`].
#[derive(Debug, Default)]
pub struct InvocationLedger {
    inner: Mutex<LedgerInner>,
}

impl InvocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one call and return its sequence number.
    pub fn record(&self, selector: &Selector, stubbed: bool) -> u64 {
        let mut inner = super::lock(&self.inner);
        let sequence = inner.records.len() as u64;
        inner
            .by_selector
            .entry(selector.clone())
            .or_default()
            .push(selector.args.clone());
        inner.records.push(InvocationRecord {
            sequence,
            selector: selector.clone(),
            stubbed,
        });
        sequence
    }

    /// Number of calls recorded for exactly this selector.
    pub fn count(&self, selector: &Selector) -> usize {
        super::lock(&self.inner)
            .by_selector
            .get(selector)
            .map_or(0, Vec::len)
    }

    /// Number of calls to `member` with any arguments.
    pub fn count_member(&self, member: &str) -> usize {
        super::lock(&self.inner)
            .records
            .iter()
            .filter(|r| r.selector.member == member)
            .count()
    }

    /// Argument vectors of every call to `member`, in arrival order.
    pub fn invocations(&self, member: &str) -> Vec<Vec<Value>> {
        super::lock(&self.inner)
            .records
            .iter()
            .filter(|r| r.selector.member == member)
            .map(|r| r.selector.args.clone())
            .collect()
    }

    /// Every call in arrival order.
    pub fn records(&self) -> Vec<InvocationRecord> {
        super::lock(&self.inner).records.clone()
    }

    pub fn len(&self) -> usize {
        super::lock(&self.inner).records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = super::lock(&self.inner);
        inner.by_selector.clear();
        inner.records.clear();
    }
}
