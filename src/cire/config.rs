//! Configuration loading
//!
//! `defaults/cire.default.toml` is embedded into the binary so that documented defaults
//! and runtime behavior stay in sync. Callers layer user files and command-line
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`CireConfig`].

use chrono::NaiveDate;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/cire.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CireConfig {
    pub output: OutputConfig,
    pub prose: ProseConfig,
    pub render: RenderConfig,
    pub formats: FormatsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub prefix_date: bool,
}

impl OutputConfig {
    /// Default output location for `source`: next to it, named after the full file
    /// name plus `extension`, optionally prefixed with `today`.
    pub fn resolve_path(&self, source: &Path, extension: &str, today: NaiveDate) -> PathBuf {
        let dir = source.parent().unwrap_or_else(|| Path::new(""));
        let base = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let name = if self.prefix_date {
            format!("{}-{}.{}", today.format("%Y-%m-%d"), base, extension)
        } else {
            format!("{base}.{extension}")
        };
        dir.join(name)
    }
}

/// How comment text becomes prose.
#[derive(Debug, Clone, Deserialize)]
pub struct ProseConfig {
    pub language: String,
    pub standalone_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub show_doc_hovers: bool,
}

/// Per-format knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatsConfig {
    pub markdown: WrapperConfig,
    pub mdx: WrapperConfig,
}

/// Markup placed around every code block.
#[derive(Debug, Clone, Deserialize)]
pub struct WrapperConfig {
    pub code_wrapper_start: String,
    pub code_wrapper_end: String,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (command-line settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<CireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CireConfig, ConfigError> {
    Loader::new().build()
}
