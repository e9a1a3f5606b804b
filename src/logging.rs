//! Structured logging for mock creation, resolution and verification.
//!
//! Events are emitted through `tracing` with structured fields. Nothing is
//! printed unless the host installs a subscriber; [`init_tracing`] installs a
//! stderr subscriber for test binaries that want the output.

use crate::redirect::RedirectKey;
use crate::runtime::Selector;
use std::fmt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "MOCKSMITH_LOG";

/// When set, events are written as JSON lines.
pub const JSON_ENV: &str = "MOCKSMITH_LOG_JSON";

/// Install a stderr subscriber.
///
/// The filter comes from `MOCKSMITH_LOG`, falling back to
/// `mocksmith=<level>`. Returns `false` when a global subscriber was already
/// installed, so calling this from every test is harmless.
pub fn init_tracing(level: &str, json: bool) -> bool {
    let fallback_filter = format!("mocksmith={}", level);
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| fallback_filter.into());
    let use_json = json || std::env::var(JSON_ENV).is_ok();

    if use_json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .is_ok()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
    }
}

/// Log mock creation.
pub fn log_mock_created(mock: &str, shape: &str) {
    tracing::info!(mock, shape, "Mock created");
}

/// Log a shape that offers no interception point.
pub fn log_unsupported_shape(shape: &str) {
    tracing::warn!(shape, "Shape has no interception point");
}

/// Log stub registration.
pub fn log_stub_registered(mock: &str, selector: &Selector, behavior: &str) {
    tracing::debug!(mock, selector = %selector, behavior, "Stub registered");
}

/// Log one resolved call.
pub fn log_invocation(mock: &str, selector: &Selector, sequence: u64, stubbed: bool) {
    tracing::debug!(mock, selector = %selector, sequence, stubbed, "Call resolved");
}

pub fn log_mock_reset(mock: &str) {
    tracing::info!(mock, "Mock reset");
}

/// Log installation of a global override.
pub fn log_override_installed(key: &RedirectKey, behavior: &str) {
    tracing::debug!(key = %key, behavior, "Global override installed");
}

/// Log a redirected call and whether it falls through to the original body.
pub fn log_redirect(key: &RedirectKey, proceed: bool) {
    if proceed {
        tracing::debug!(key = %key, "No override, proceeding to original body");
    } else {
        tracing::debug!(key = %key, "Redirected call answered by override");
    }
}

pub fn log_global_reset(scope: &str, removed: usize) {
    tracing::info!(scope, removed, "Global overrides reset");
}

pub fn log_verification_passed(subject: &str, selector: &Selector, actual: usize) {
    tracing::debug!(subject, selector = %selector, actual, "Verification passed");
}

/// Log a failed verification.
pub fn log_verification_failed(subject: &str, selector: &dyn fmt::Display, expected: &str, actual: usize) {
    tracing::warn!(subject, selector = %selector, expected, actual, "Verification failed");
}

/// Log configuration fallback.
pub fn log_config_fallback(error: &dyn fmt::Display) {
    tracing::warn!(error = %error, "Failed to load config, using defaults");
}
