pub mod behavior;
pub mod dispatcher;
pub mod ledger;
pub mod selector;
pub mod stubs;

pub use behavior::{Behavior, Failure, Implementation, Outcome, Proceed, Redirect};
pub use dispatcher::{Dispatcher, MockState};
pub use ledger::{InvocationLedger, InvocationRecord};
pub use selector::{MockId, Selector};
pub use stubs::StubTable;

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Poisoning is ignored: every mutation under these locks is a single map or
// vector operation, so the guarded tables stay consistent across a panic.

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
