use super::keys::{InstanceKey, OwnerType, RedirectKey, Signature};
use crate::logging;
use crate::runtime::{lock, read_lock, write_lock, Behavior, Outcome, Redirect};
use crate::value::Value;
use crate::{MockError, MockResult};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, RwLock};

static GLOBAL: OnceLock<GlobalOverrideTable> = OnceLock::new();

/// Process-wide overrides for constructors, statics and private members.
///
/// Writes are visible to every thread that reads afterwards; concurrent
/// writes to one key resolve as last write wins.
///
/// Calls are logged only for armed keys. Installing an override arms its
/// key, and [`arm`](Self::arm) watches a key that has none. Calls to an
/// unarmed key proceed without leaving anything behind.
#[derive(Debug, Default)]
pub struct GlobalOverrideTable {
    overrides: RwLock<HashMap<RedirectKey, Behavior>>,
    calls: Mutex<HashMap<RedirectKey, Vec<Vec<Value>>>>,
}

impl GlobalOverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table consulted by the redirection entry points.
    pub fn global() -> &'static GlobalOverrideTable {
        GLOBAL.get_or_init(GlobalOverrideTable::new)
    }

    /// Store `behavior` for `key`, returning the one it replaced.
    pub fn install(&self, key: RedirectKey, behavior: Behavior) -> Option<Behavior> {
        logging::log_override_installed(&key, behavior.label());
        self.arm(key.clone());
        write_lock(&self.overrides).insert(key, behavior)
    }

    /// Start logging calls to `key`. Calls logged earlier are kept.
    pub fn arm(&self, key: RedirectKey) {
        lock(&self.calls).entry(key).or_default();
    }

    pub fn is_armed(&self, key: &RedirectKey) -> bool {
        lock(&self.calls).contains_key(key)
    }

    pub fn lookup(&self, key: &RedirectKey) -> Option<Behavior> {
        read_lock(&self.overrides).get(key).cloned()
    }

    pub fn contains(&self, key: &RedirectKey) -> bool {
        read_lock(&self.overrides).contains_key(key)
    }

    /// Answer one redirected call.
    ///
    /// The call is logged when `key` is armed. Without an override the
    /// answer is [`Redirect::Proceed`] and the call site runs its own body.
    pub fn resolve(&self, key: &RedirectKey, args: &[Value]) -> MockResult<Redirect> {
        let behavior = self.lookup(key);
        if let Some(log) = lock(&self.calls).get_mut(key) {
            log.push(args.to_vec());
        }
        logging::log_redirect(key, behavior.is_none());

        match behavior.map(|b| b.apply(args)) {
            None => Ok(Redirect::proceed()),
            Some(Outcome::Raise(failure)) => Err(MockError::Stubbed(failure)),
            Some(Outcome::Value(value)) | Some(Outcome::Default(value)) => Ok(Redirect::Value(value)),
        }
    }

    /// Number of redirected calls to `key` made with exactly `args`.
    pub fn count(&self, key: &RedirectKey, args: &[Value]) -> usize {
        lock(&self.calls)
            .get(key)
            .map_or(0, |calls| calls.iter().filter(|c| c.as_slice() == args).count())
    }

    /// Argument vectors of every redirected call to `key`.
    pub fn calls(&self, key: &RedirectKey) -> Vec<Vec<Value>> {
        lock(&self.calls).get(key).cloned().unwrap_or_default()
    }

    /// Drop overrides and counts for every key matching `pred`.
    pub fn remove_where(&self, pred: impl Fn(&RedirectKey) -> bool) -> usize {
        let mut overrides = write_lock(&self.overrides);
        let before = overrides.len();
        overrides.retain(|key, _| !pred(key));
        lock(&self.calls).retain(|key, _| !pred(key));
        before - overrides.len()
    }

    /// Every constructor and static override of `owner`.
    pub fn clear_owner(&self, owner: OwnerType) -> usize {
        self.remove_where(|key| key.owner() == Some(owner))
    }

    /// The constructor override of `owner` for one signature.
    pub fn clear_signature(&self, owner: OwnerType, signature: &Signature) -> usize {
        self.remove_where(|key| {
            matches!(key, RedirectKey::Constructor { owner: o, signature: s } if *o == owner && s == signature)
        })
    }

    pub fn clear_static(&self, owner: OwnerType, member: &str) -> usize {
        self.remove_where(|key| {
            matches!(key, RedirectKey::Static { owner: o, member: m } if *o == owner && m == member)
        })
    }

    /// Every private override layered on `instance`.
    pub fn clear_instance(&self, instance: InstanceKey) -> usize {
        self.remove_where(|key| {
            matches!(key, RedirectKey::Private { instance: i, .. } if *i == instance)
        })
    }

    pub fn clear(&self) -> usize {
        self.remove_where(|_| true)
    }

    pub fn len(&self) -> usize {
        read_lock(&self.overrides).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
