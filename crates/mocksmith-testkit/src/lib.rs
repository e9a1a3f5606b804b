//! Conveniences for tests written against `mocksmith`.
//!
//! [`MockBuilder`] configures a mock in one expression, optionally from a
//! JSON stub document, and [`LedgerAssertions`] turns verification results
//! into test panics with the ledger listing attached.

pub mod assertions;
pub mod builder;
pub mod json;

pub use assertions::LedgerAssertions;
pub use builder::MockBuilder;
pub use json::{stubs_from_json, stubs_from_path, ScriptedFailure, StubEntry};

use mocksmith::MockError;

#[derive(Debug, thiserror::Error)]
pub enum TestkitError {
    #[error("stub document error: {0}")]
    Json(String),

    #[error(transparent)]
    Mock(#[from] MockError),
}
