use crate::factory::MockSettings;
use crate::logging;
use crate::{MockError, MockResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".mocksmith.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default capability switches for mocks created through a configured factory.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MockConfig {
    #[serde(default)]
    pub mock_final_methods: bool,
    #[serde(default)]
    pub mock_static_methods: bool,
    #[serde(default)]
    pub mock_private_methods: bool,
    #[serde(default)]
    pub mock_constructors: bool,
}

impl MockConfig {
    pub fn to_settings(&self) -> MockSettings {
        MockSettings {
            name: None,
            mock_final_methods: self.mock_final_methods,
            mock_static_methods: self.mock_static_methods,
            mock_private_methods: self.mock_private_methods,
            mock_constructors: self.mock_constructors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Fallback level when `MOCKSMITH_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from a file in the working directory
    pub fn load() -> MockResult<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> MockResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            MockError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            MockError::Config(format!(
                "Failed to parse TOML config from {:?}: {}",
                path, e
            ))
        })
    }

    /// Load default config if file is missing, otherwise warn on failure and use defaults
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                logging::log_config_fallback(&e);
                Config::default()
            }
        }
    }

    /// Install the stderr subscriber described by the `[logging]` table.
    pub fn init_tracing(&self) -> bool {
        logging::init_tracing(&self.logging.level, self.logging.json)
    }
}
