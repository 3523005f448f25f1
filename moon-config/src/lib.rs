//! Configuration loader for the moon command-line tool.
//!
//! `defaults/moon.default.toml` is embedded into the binary so that the documented defaults and
//! the runtime behavior cannot drift apart. User files and command-line overrides are layered on
//! top of it via [`Loader`] before deserializing into [`MoonConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError as Error;

const DEFAULT_TOML: &str = include_str!("../defaults/moon.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MoonConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// How models and pipeline stages are printed.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive in `tracing_subscriber::EnvFilter` syntax.
    pub filter: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MoonConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<MoonConfig, ConfigError> {
    Loader::new().build()
}
