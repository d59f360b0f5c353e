//! Configuration schema.
//!
//! Configuration is deserialized via the `config` crate from optional TOML
//! files plus `SUITEWRAP__`-prefixed environment variables. Every field has
//! a default, so an empty configuration is valid.

pub mod logging;
pub mod plugin;
pub mod runner;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;
use self::runner::RunnerConfig;

use crate::error::AppError;

/// Root configuration.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
    /// In-memory runner settings.
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Plugin system settings.
    #[serde(default)]
    pub plugins: PluginConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// `config/{env}` and environment variables prefixed with `SUITEWRAP`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SUITEWRAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::from_config(config)
    }

    /// Load configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: config::Config) -> Result<Self, AppError> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }
}
