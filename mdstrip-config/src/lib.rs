//! Shared configuration loader for mdstrip.
//!
//! `defaults/mdstrip.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`], then command-line settings through its
//! typed overrides, before deserializing into [`MdstripConfig`].
//!
//! The `[custom]` table starts with every operation off: custom mode strips
//! exactly what a file or a switch turns on.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
pub use config::ConfigError;
use mdstrip_core::{Cleaner, Mode, Operation, OptionSet, UnknownNameError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_TOML: &str = include_str!("../defaults/mdstrip.default.toml");

/// Name of the per-directory configuration file picked up automatically.
pub const LOCAL_CONFIG_FILE: &str = "mdstrip.toml";

/// Top-level configuration consumed by mdstrip applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdstripConfig {
    pub cleaning: CleaningConfig,
    /// Operations used by [`Mode::Custom`].
    pub custom: OptionSet,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleaningConfig {
    pub mode: Mode,
    pub max_input_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub stats: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Text, OutputFormat::Json];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| UnknownNameError {
                kind: "format",
                name: s.to_string(),
            })
    }
}

impl MdstripConfig {
    /// Build the cleaner this configuration describes.
    pub fn cleaner(&self) -> Cleaner {
        Cleaner::new(self.cleaning.mode, &self.custom)
            .with_max_input_bytes(self.cleaning.max_input_bytes)
    }
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
        log::debug!("layering config file {}", path.as_ref().display());
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        log::debug!("layering optional config file {}", path.as_ref().display());
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override `cleaning.mode`.
    pub fn with_mode(self, mode: Mode) -> Result<Self, ConfigError> {
        self.set("cleaning.mode", mode.name())
    }

    /// Switch one operation of the `[custom]` table on or off.
    pub fn enable(self, op: Operation, enabled: bool) -> Result<Self, ConfigError> {
        self.set(&format!("custom.{}", op.name()), enabled)
    }

    /// Override `cleaning.max_input_bytes`.
    pub fn with_max_input_bytes(self, limit: usize) -> Result<Self, ConfigError> {
        self.set(
            "cleaning.max_input_bytes",
            i64::try_from(limit).unwrap_or(i64::MAX),
        )
    }

    pub fn with_stats(self, stats: bool) -> Result<Self, ConfigError> {
        self.set("output.stats", stats)
    }

    pub fn with_format(self, format: OutputFormat) -> Result<Self, ConfigError> {
        self.set("output.format", format.name())
    }

    fn set<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        log::trace!("config override {}", key);
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdstripConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdstripConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdstrip_core::DEFAULT_MAX_INPUT_BYTES;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.cleaning.mode, Mode::PlainText);
        assert_eq!(config.cleaning.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert_eq!(config.custom, OptionSet::none());
        assert!(!config.output.stats);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .with_mode(Mode::Custom)
            .expect("override to apply")
            .enable(Operation::StripLinks, true)
            .expect("override to apply")
            .with_format(OutputFormat::Json)
            .expect("override to apply")
            .with_stats(true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.cleaning.mode, Mode::Custom);
        assert_eq!(
            config.custom,
            OptionSet::none().with(Operation::StripLinks, true)
        );
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.stats);
    }

    #[test]
    fn later_override_wins() {
        let config = Loader::new()
            .enable(Operation::StripHeaders, true)
            .expect("override to apply")
            .enable(Operation::StripHeaders, false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.custom.strip_headers);
    }

    #[test]
    fn every_operation_has_a_custom_key() {
        for op in Operation::ALL {
            let config = Loader::new()
                .enable(op, true)
                .expect("override to apply")
                .build()
                .expect("config to build");
            assert_eq!(config.custom.enabled(), vec![op]);
        }
    }

    #[test]
    fn parses_output_format_names() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(
            "yaml".parse::<OutputFormat>().unwrap_err().to_string(),
            "Unknown format: 'yaml'"
        );
    }

    #[test]
    fn cleaner_follows_config() {
        let config = Loader::new()
            .with_max_input_bytes(8)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let cleaner = config.cleaner();
        assert_eq!(cleaner.mode(), Mode::PlainText);
        assert_eq!(cleaner.max_input_bytes(), 8);
        assert!(cleaner.clean("<b>far too long</b>").is_err());
    }
}
