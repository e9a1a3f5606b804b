use super::behavior::Behavior;
use super::selector::Selector;
use super::{read_lock, write_lock};
use std::collections::HashMap;
use std::sync::RwLock;

/// Selector to behavior mapping owned by a single mock.
///
/// Writing a selector that is already present replaces its behavior.
#[derive(Debug, Default)]
pub struct StubTable {
    entries: RwLock<HashMap<Selector, Behavior>>,
}

impl StubTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `behavior` for `selector`, returning the behavior it replaced.
    pub fn insert(&self, selector: Selector, behavior: Behavior) -> Option<Behavior> {
        write_lock(&self.entries).insert(selector, behavior)
    }

    pub fn lookup(&self, selector: &Selector) -> Option<Behavior> {
        read_lock(&self.entries).get(selector).cloned()
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        read_lock(&self.entries).contains_key(selector)
    }

    pub fn remove(&self, selector: &Selector) -> Option<Behavior> {
        write_lock(&self.entries).remove(selector)
    }

    pub fn len(&self) -> usize {
        read_lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        write_lock(&self.entries).clear();
    }
}
