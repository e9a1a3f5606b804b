//! Test doubles with configurable behavior and call verification.
//!
//! A mock is created from a [`Shape`] describing the type it replaces. Calls
//! reach it either through a dispatch proxy ([`mock_trait!`]) or, for
//! constructors, statics and private members, through the call-site seams in
//! [`redirect`]. Every call is recorded and answered by a configured
//! [`Behavior`] or by the default for the member's declared return type.

pub mod api;
pub mod config;
pub mod defaults;
pub mod factory;
pub mod logging;
pub mod redirect;
pub mod runtime;
pub mod value;
pub mod verify;

use miette::Diagnostic;

pub use api::{default_factory, mock, mock_with, reset, when, StubBuilder};
pub use config::Config;
pub use factory::{MockFactory, MockHandle, MockSettings, ProxyKind, Shape, ShapeKind};
pub use redirect::{
    reset_all_global, reset_global, reset_global_signature, reset_private, reset_static,
    InstanceKey, OwnerType, Signature,
};
pub use runtime::{Behavior, Dispatcher, Failure, MockId, Outcome, Proceed, Redirect, Selector};
pub use value::{FromValue, Record, TypeTag, Value};
pub use verify::{verify, CountCheck, Times};

/// Result type alias for mock operations
pub type MockResult<T> = std::result::Result<T, MockError>;

/// Error types for mock configuration, invocation and verification
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum MockError {
    #[error("Mock misuse: {0}")]
    #[diagnostic(
        code(mocksmith::misuse),
        help("Check the member name, argument types and return type against the mock's shape.")
    )]
    Misuse(String),

    /// A configured failure, re-raised unchanged.
    #[error("{0}")]
    #[diagnostic(code(mocksmith::stubbed_failure))]
    Stubbed(Failure),

    #[error("Verification failed for {selector}: expected {expected}, but it was invoked {actual} time(s)\n{recorded}")]
    #[diagnostic(
        code(mocksmith::verification_failed),
        help("Compare the expected arguments with the recorded calls listed above; arguments are matched by value and numeric widths must agree.")
    )]
    Verification {
        selector: String,
        expected: String,
        actual: usize,
        recorded: String,
    },

    #[error("Unsupported shape: {0}")]
    #[diagnostic(
        code(mocksmith::unsupported_shape),
        help("Declare the members as overridable, enable `mock_final_methods`, or enable a redirection switch and route the calls through the `redirect` seams.")
    )]
    UnsupportedShape(String),

    #[error("Cannot convert {found} into {expected}")]
    #[diagnostic(
        code(mocksmith::conversion),
        help("The configured value does not match the Rust type expected by the caller.")
    )]
    Conversion { expected: String, found: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(mocksmith::config),
        help("Check that the configuration file exists and is valid TOML.")
    )]
    Config(String),
}

impl MockError {
    /// The configured failure carried by a `Stubbed` error.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            MockError::Stubbed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Downcast the configured failure to its concrete type.
    pub fn downcast_failure<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.failure().and_then(|f| f.downcast_ref::<E>())
    }
}
