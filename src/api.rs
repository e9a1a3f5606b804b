//! Test-facing entry points.
//!
//! ```
//! use mocksmith::{args, mock, verify, when, Shape, TypeTag};
//!
//! let shape = Shape::interface("Repo")
//!     .method("save", [TypeTag::I64], TypeTag::Bool)
//!     .build()?;
//! let repo = mock(shape)?;
//! when(&repo, "save", args![1i64]).then_return(true)?;
//!
//! assert!(repo.call::<bool>("save", args![1i64])?);
//! assert!(!repo.call::<bool>("save", args![2i64])?);
//! verify(&repo).method("save", args![1i64]).once()?;
//! # Ok::<(), mocksmith::MockError>(())
//! ```

use crate::factory::{MockFactory, MockHandle, MockSettings, Shape};
use crate::runtime::{Behavior, Failure, Selector};
use crate::value::Value;
use crate::MockResult;
use std::error::Error;
use std::sync::{Arc, OnceLock};

static DEFAULT_FACTORY: OnceLock<MockFactory> = OnceLock::new();

/// The factory behind [`mock`] and [`mock_with`].
pub fn default_factory() -> &'static MockFactory {
    DEFAULT_FACTORY.get_or_init(MockFactory::new)
}

/// Create a mock of `shape` with default settings.
pub fn mock(shape: Shape) -> MockResult<MockHandle> {
    default_factory().create_mock_with(shape, MockSettings::new())
}

pub fn mock_with(shape: Shape, settings: MockSettings) -> MockResult<MockHandle> {
    default_factory().create_mock_with(shape, settings)
}

/// Begin configuring the answer to `member` called with `args`.
pub fn when<'a>(handle: &'a MockHandle, member: &str, args: Vec<Value>) -> StubBuilder<'a> {
    StubBuilder {
        handle,
        selector: Selector::new(member, args),
    }
}

/// Clear the stubs and recorded calls of one mock.
pub fn reset(handle: &MockHandle) -> MockResult<()> {
    handle.dispatcher().reset(handle.id())
}

/// Second half of `when(...)`. Configuration is validated against the
/// mock's shape when one of the `then_*` methods runs.
#[derive(Debug)]
#[must_use = "a stub is only configured by one of the `then_*` methods"]
pub struct StubBuilder<'a> {
    handle: &'a MockHandle,
    selector: Selector,
}

impl<'a> StubBuilder<'a> {
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn then_return(self, value: impl Into<Value>) -> MockResult<()> {
        self.configure(Behavior::ReturnValue(value.into()))
    }

    pub fn then_throw<E>(self, error: E) -> MockResult<()>
    where
        E: Error + Send + Sync + 'static,
    {
        self.then_throw_shared(Arc::new(error))
    }

    /// Raise this exact failure object. Callers receive a clone of the same
    /// `Arc`, so `Arc::ptr_eq` holds between what was configured and what
    /// was raised.
    pub fn then_throw_shared(self, failure: Failure) -> MockResult<()> {
        self.configure(Behavior::ThrowValue(failure))
    }

    pub fn then_implement<F>(self, f: F) -> MockResult<()>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.configure(Behavior::implementation(f))
    }

    /// Like [`then_implement`](Self::then_implement), but an `Err` from `f`
    /// is raised to the caller as [`MockError::Stubbed`](crate::MockError::Stubbed).
    pub fn then_try_implement<F>(self, f: F) -> MockResult<()>
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + Send + Sync + 'static,
    {
        self.configure(Behavior::fallible(f))
    }

    fn configure(self, behavior: Behavior) -> MockResult<()> {
        self.handle
            .dispatcher()
            .configure(self.handle.id(), self.selector, behavior)
    }
}
