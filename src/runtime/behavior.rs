use crate::value::Value;
use crate::{MockError, MockResult};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A user-supplied error stored by `then_throw` and re-raised on every
/// matching call. Re-raising clones the `Arc`, so the caller receives the
/// very object that was configured.
pub type Failure = Arc<dyn Error + Send + Sync + 'static>;

/// A custom function standing in for a member body. An `Err` is raised to
/// the caller exactly like a configured throw.
pub type Implementation = Arc<dyn Fn(&[Value]) -> Result<Value, Failure> + Send + Sync + 'static>;

/// Configured response for a selector.
#[derive(Clone)]
pub enum Behavior {
    ReturnValue(Value),
    ThrowValue(Failure),
    Implementation(Implementation),
}

impl Behavior {
    pub fn implementation<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Behavior::Implementation(Arc::new(move |args: &[Value]| -> Result<Value, Failure> { Ok(f(args)) }))
    }

    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Failure> + Send + Sync + 'static,
    {
        Behavior::Implementation(Arc::new(f))
    }

    /// Produce the outcome of a call that matched this behavior.
    pub fn apply(&self, args: &[Value]) -> Outcome {
        match self {
            Behavior::ThrowValue(failure) => Outcome::Raise(Arc::clone(failure)),
            Behavior::Implementation(f) => match f(args) {
                Ok(value) => Outcome::Value(value),
                Err(failure) => Outcome::Raise(failure),
            },
            Behavior::ReturnValue(value) => Outcome::Value(value.clone()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Behavior::ReturnValue(_) => "return",
            Behavior::ThrowValue(_) => "throw",
            Behavior::Implementation(_) => "implementation",
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::ReturnValue(v) => f.debug_tuple("ReturnValue").field(v).finish(),
            Behavior::ThrowValue(e) => f.debug_tuple("ThrowValue").field(&e.to_string()).finish(),
            Behavior::Implementation(_) => f.write_str("Implementation(..)"),
        }
    }
}

/// Result of resolving one call against a mock.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A stub matched and produced this value.
    Value(Value),
    /// No stub matched; this is the declared return type's default.
    Default(Value),
    /// A stub matched and re-raises the configured failure.
    Raise(Failure),
}

impl Outcome {
    pub fn is_stubbed(&self) -> bool {
        !matches!(self, Outcome::Default(_))
    }

    /// Collapse into the value the caller sees, surfacing a raise as
    /// [`MockError::Stubbed`].
    pub fn into_result(self) -> MockResult<Value> {
        match self {
            Outcome::Value(v) | Outcome::Default(v) => Ok(v),
            Outcome::Raise(failure) => Err(MockError::Stubbed(failure)),
        }
    }
}

/// Marker meaning "no configured behavior; run the original body".
///
/// It cannot be built outside this crate and is not a [`Value`], so it can
/// never be stored as a stub's return value nor confused with `Null` or
/// `Unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Proceed {
    _private: (),
}

pub(crate) const PROCEED: Proceed = Proceed { _private: () };

/// Answer of a redirection hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Proceed(Proceed),
    Value(Value),
}

impl Redirect {
    pub(crate) fn proceed() -> Self {
        Redirect::Proceed(PROCEED)
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, Redirect::Proceed(_))
    }

    pub fn value(self) -> Option<Value> {
        match self {
            Redirect::Value(v) => Some(v),
            Redirect::Proceed(_) => None,
        }
    }
}
