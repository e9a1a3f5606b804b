//! Dispatch proxies for user traits.
//!
//! A proxy is an ordinary struct implementing the trait under test whose
//! every method forwards to [`MockHandle::invoke`](crate::MockHandle::invoke).
//! [`mock_trait!`](crate::mock_trait) writes that struct; hand-written
//! adapters can call [`Forward::forward`] the same way.
//!
//! Proxied methods take `&self` and return `Result<T, E>` where `T` converts
//! from a [`Value`](crate::Value) and `E: From<MockError>`, so a configured
//! failure reaches the caller as an ordinary error.

use crate::runtime::Outcome;
use crate::value::FromValue;
use crate::{MockError, MockResult};

/// Turn the dispatcher's answer into a proxied method's return type.
pub trait Forward: Sized {
    fn forward(outcome: MockResult<Outcome>) -> Self;
}

impl<T, E> Forward for Result<T, E>
where
    T: FromValue,
    E: From<MockError>,
{
    fn forward(outcome: MockResult<Outcome>) -> Self {
        outcome
            .and_then(Outcome::into_result)
            .and_then(T::from_value)
            .map_err(E::from)
    }
}

/// Generate a dispatch proxy implementing a trait.
///
/// ```
/// use mocksmith::{mock_trait, MockError, MockFactory, Shape, TypeTag};
///
/// pub trait Counter {
///     fn add(&self, amount: i64) -> Result<i64, MockError>;
/// }
///
/// mock_trait! {
///     pub struct MockCounter: Counter {
///         fn add(&self, amount: i64) -> Result<i64, MockError>;
///     }
/// }
///
/// let shape = Shape::interface("Counter")
///     .method("add", [TypeTag::I64], TypeTag::I64)
///     .build()
///     .unwrap();
/// let counter = MockCounter::new(MockFactory::new().create_mock(shape).unwrap());
/// assert_eq!(counter.add(5).unwrap(), 0);
/// ```
#[macro_export]
macro_rules! mock_trait {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $trait:path {
            $(fn $method:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            handle: $crate::MockHandle,
        }

        impl $name {
            pub fn new(handle: $crate::MockHandle) -> Self {
                Self { handle }
            }

            pub fn handle(&self) -> &$crate::MockHandle {
                &self.handle
            }
        }

        impl $trait for $name {
            $(
                fn $method(&self $(, $arg: $ty)*) -> $ret {
                    $crate::factory::proxy::Forward::forward(self.handle.invoke(
                        stringify!($method),
                        ::std::vec![$($crate::Value::from($arg)),*],
                    ))
                }
            )*
        }
    };
}
