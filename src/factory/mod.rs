//! Creation of mock identities.

pub mod handle;
pub mod proxy;
pub mod settings;
pub mod shape;

pub use handle::{MockHandle, ProxyKind};
pub use settings::MockSettings;
pub use shape::{MemberKind, MemberSpec, Shape, ShapeBuilder, ShapeKind};

use crate::config::Config;
use crate::logging;
use crate::runtime::Dispatcher;
use crate::{MockError, MockResult};
use std::sync::Arc;

/// Produces mocks registered with one dispatcher.
#[derive(Debug, Clone)]
pub struct MockFactory {
    dispatcher: Arc<Dispatcher>,
    defaults: MockSettings,
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFactory {
    /// A factory with its own, empty dispatcher.
    pub fn new() -> Self {
        Self::with_dispatcher(Arc::new(Dispatcher::new()))
    }

    pub fn with_dispatcher(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            defaults: MockSettings::new(),
        }
    }

    /// A factory whose default settings come from the `[mock]` table of a
    /// loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new().with_defaults(config.mock.to_settings())
    }

    /// Settings applied by [`MockFactory::create_mock`].
    pub fn with_defaults(mut self, defaults: MockSettings) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &MockSettings {
        &self.defaults
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Create a mock of `shape` using the factory defaults.
    pub fn create_mock(&self, shape: Shape) -> MockResult<MockHandle> {
        self.create_mock_with(shape, self.defaults.clone())
    }

    /// Create a mock of `shape` with explicit settings.
    ///
    /// Interfaces and classes with at least one proxiable member get a
    /// dispatch proxy. A class with nothing proxiable is still accepted when
    /// the settings enable redirection for one of its members; otherwise the
    /// shape cannot be intercepted at all and creation fails.
    pub fn create_mock_with(&self, shape: Shape, settings: MockSettings) -> MockResult<MockHandle> {
        let proxiable = shape.members.iter().any(|m| settings.proxies(m));
        let proxy = if shape.is_interface() || proxiable {
            ProxyKind::Dispatch
        } else if settings.has_redirection_hook(&shape) {
            ProxyKind::Plain
        } else {
            logging::log_unsupported_shape(&shape.name);
            return Err(MockError::UnsupportedShape(format!(
                "{} has no overridable members and no redirection hook is enabled for it",
                shape.name
            )));
        };

        let state = self.dispatcher.register(Arc::new(shape), settings);
        Ok(MockHandle::new(
            state.id,
            &state.name,
            Arc::clone(&state.shape),
            proxy,
            Arc::clone(&self.dispatcher),
        ))
    }

    /// Drop a mock's tables. Handles to it keep working as values but every
    /// further call through them is a misuse.
    pub fn release(&self, handle: &MockHandle) -> bool {
        self.dispatcher.release(handle.id())
    }
}
